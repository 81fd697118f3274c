use batchforge_schemas::chemical::PureSubstanceReference;

/// Builds a substance handle from a name and an optional registry id.
///
/// No lookup happens here; `external_id` is passed through untouched and
/// `load_data` is always `false`.
pub fn resolve(name: &str, external_id: Option<&str>) -> PureSubstanceReference {
    PureSubstanceReference {
        name: name.trim().to_string(),
        external_id: external_id.map(str::to_string),
        load_data: false,
    }
}
