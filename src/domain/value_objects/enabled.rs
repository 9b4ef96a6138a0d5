/// Parse the `enabled` request parameter.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` as true and
/// `0`, `f`, `F`, `FALSE`, `false`, `False` as false. Any other value,
/// including a missing one, is treated as false instead of being rejected.
#[must_use]
pub fn parse_enabled(raw: Option<&str>) -> bool {
    matches!(raw, Some("1" | "t" | "T" | "TRUE" | "true" | "True"))
}
