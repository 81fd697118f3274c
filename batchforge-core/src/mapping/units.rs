//! Column-label units and the conversions applied before emission.

/// `(label unit, stored unit, factor)`. Labels not listed keep their unit.
const CONVERSIONS: &[(&str, &str, f64)] = &[
    ("uL", "ml", 1e-3),
    ("µL", "ml", 1e-3),
    ("mL", "ml", 1.0),
    ("mM", "mol/L", 1e-3),
    ("min", "s", 60.0),
    ("bar", "mbar", 1e3),
    ("cm", "µm", 1e4),
    ("kHz", "Hz", 1e3),
];

/// The text inside the last `[...]` of a column label.
pub fn label_unit(label: &str) -> Option<&str> {
    let open = label.rfind('[')?;
    let close = label[open..].find(']')? + open;
    let unit = label[open + 1..close].trim();
    (!unit.is_empty()).then_some(unit)
}

/// The label with its unit bracket removed, e.g. `Time 1 [s]` -> `Time 1`.
pub fn label_name(label: &str) -> &str {
    match label.rfind('[') {
        Some(open) => label[..open].trim_end(),
        None => label.trim(),
    }
}

/// Factor and target unit for a value read in `unit`.
pub fn conversion(unit: &str) -> (f64, &str) {
    CONVERSIONS
        .iter()
        .find(|(from, _, _)| *from == unit)
        .map_or((1.0, unit), |(_, to, factor)| (*factor, *to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0), "{} != {}", a, b);
    }

    #[test]
    fn unit_is_read_from_the_last_bracket() {
        assert_eq!(label_unit("Solvent 1 volume [uL]"), Some("uL"));
        assert_eq!(label_unit("Printed area [mm²]"), Some("mm²"));
        assert_eq!(label_unit("Tooling factor"), None);
        assert_eq!(label_unit("Broken [unit"), None);
        assert_eq!(label_name("Time 1 [s]"), "Time 1");
        assert_eq!(label_name("Notes"), "Notes");
    }

    #[test]
    fn declared_conversions() {
        let (f, u) = conversion("uL");
        assert_close(10.0 * f, 0.01);
        assert_eq!(u, "ml");

        let (f, u) = conversion("mM");
        assert_close(1.42 * f, 0.00142);
        assert_eq!(u, "mol/L");

        let (f, u) = conversion("min");
        assert_close(30.0 * f, 1800.0);
        assert_eq!(u, "s");

        assert_eq!(conversion("bar"), (1e3, "mbar"));
        assert_eq!(conversion("cm"), (1e4, "µm"));
        assert_eq!(conversion("kHz"), (1e3, "Hz"));
    }

    #[test]
    fn unlisted_units_are_kept() {
        assert_eq!(conversion("°C"), (1.0, "°C"));
        assert_eq!(conversion("angstrom/s"), (1.0, "angstrom/s"));
        assert_eq!(conversion("uL/min"), (1.0, "uL/min"));
    }
}
