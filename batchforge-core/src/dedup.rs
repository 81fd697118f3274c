//! Equivalence classes of block rows.

use crate::workbook::{Cell, Group};

/// Rows of one block whose cells are pairwise equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceClass {
    /// 0-based, in order of first appearance, counting non-blank classes only.
    pub index: usize,
    /// Workbook data-row indices, in input order.
    pub rows: Vec<usize>,
}

impl EquivalenceClass {
    pub fn first_row(&self) -> usize {
        self.rows[0]
    }
}

/// Partitions `rows` (data-row indices) of `group` into classes.
/// A class whose cells are all blank is dropped.
pub fn equivalence_classes(group: &Group<'_>, rows: &[usize]) -> Vec<EquivalenceClass> {
    let cells: Vec<&[Cell]> = rows.iter().map(|&r| group.row(r).cells()).collect();
    partition(&cells)
        .into_iter()
        .filter(|members| !cells[members[0]].iter().all(Cell::is_blank))
        .enumerate()
        .map(|(index, members)| EquivalenceClass {
            index,
            rows: members.into_iter().map(|m| rows[m]).collect(),
        })
        .collect()
}

/// Groups positions of equal tuples. Cells are not hashable (NaN equals
/// NaN here), so each tuple is compared against one representative per
/// class.
pub fn partition(tuples: &[&[Cell]]) -> Vec<Vec<usize>> {
    let mut classes: Vec<Vec<usize>> = Vec::new();
    for (position, tuple) in tuples.iter().enumerate() {
        match classes.iter_mut().find(|class| tuples[class[0]] == *tuple) {
            Some(class) => class.push(position),
            None => classes.push(vec![position]),
        }
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::Workbook;
    use proptest::prelude::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn identical_rows_share_a_class_in_first_appearance_order() {
        let a = [text("Hellmanex"), Cell::Number(30.0), Cell::Number(60.0)];
        let b = [text("Hellmanex"), Cell::Number(30.0), Cell::Number(61.0)];
        let tuples: Vec<&[Cell]> = vec![&a, &b, &a];
        assert_eq!(partition(&tuples), vec![vec![0, 2], vec![1]]);
    }

    #[test]
    fn blank_and_nan_cells_are_equal() {
        let a = [text("x"), Cell::Empty];
        let b = [text("x"), Cell::Number(f64::NAN)];
        let tuples: Vec<&[Cell]> = vec![&a, &b];
        assert_eq!(partition(&tuples), vec![vec![0, 1]]);
    }

    #[test]
    fn whitespace_text_counts_as_blank() {
        let a = [text("IPA"), Cell::Number(30.0), Cell::Empty];
        let b = [text("IPA"), Cell::Number(30.0), text("  ")];
        let c = [text("IPA"), Cell::Number(30.0), Cell::Number(f64::NAN)];
        let tuples: Vec<&[Cell]> = vec![&a, &b, &c];
        assert_eq!(partition(&tuples), vec![vec![0, 1, 2]]);
        assert_ne!(text(" x "), text("x"));
    }

    #[test]
    fn rows_differing_only_in_padding_cells_form_one_class() {
        let wb = Workbook::from_csv_reader(
            "Experiment Info,Cleaning,,\nNomad ID,Solvent 1,Time 1 [s],Notes\nS_1,IPA,30,\nS_2,IPA,30,\"  \"\n".as_bytes(),
            "t",
        )
        .unwrap();
        let cleaning = wb.groups()[1];
        let classes = equivalence_classes(&cleaning, &[0, 1]);
        assert_eq!(
            classes,
            vec![EquivalenceClass {
                index: 0,
                rows: vec![0, 1]
            }]
        );
    }

    #[test]
    fn blank_classes_are_skipped_and_do_not_consume_an_index() {
        let wb = Workbook::from_csv_reader(
            "Experiment Info,Cleaning,\nNomad ID,Solvent 1,Time 1 [s]\nS_1,,\nS_2,IPA,10\nS_3,,\n".as_bytes(),
            "t",
        )
        .unwrap();
        let cleaning = wb.groups()[1];
        let classes = equivalence_classes(&cleaning, &[0, 1, 2]);
        assert_eq!(
            classes,
            vec![EquivalenceClass {
                index: 0,
                rows: vec![1]
            }]
        );
    }

    fn cell_strategy() -> impl Strategy<Value = Cell> {
        prop_oneof![
            Just(Cell::Empty),
            Just(Cell::Number(f64::NAN)),
            (0u8..3).prop_map(|n| Cell::Number(n as f64)),
            prop::sample::select(vec!["a", "b", " ", "\t"]).prop_map(|s| Cell::Text(s.to_string())),
        ]
    }

    proptest! {
        #[test]
        fn classes_partition_rows_by_equality(
            rows in prop::collection::vec(prop::collection::vec(cell_strategy(), 3), 0..12)
        ) {
            let tuples: Vec<&[Cell]> = rows.iter().map(Vec::as_slice).collect();
            let classes = partition(&tuples);

            let mut seen: Vec<usize> = classes.iter().flatten().copied().collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..rows.len()).collect::<Vec<_>>());

            for (i, a) in classes.iter().enumerate() {
                prop_assert!(a.windows(2).all(|w| w[0] < w[1]));
                for &m in a {
                    prop_assert!(tuples[m] == tuples[a[0]]);
                }
                for b in &classes[i + 1..] {
                    prop_assert!(a[0] < b[0]);
                    prop_assert!(tuples[a[0]] != tuples[b[0]]);
                }
            }
        }
    }
}
