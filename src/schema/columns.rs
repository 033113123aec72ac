/// Column names as constants for type safety
/// Timer ticks elapsed before the event
pub const TIME: &str = "TIME";
/// Prefix of per-channel ADC value columns
pub const ADC_PREFIX: &str = "ADC";

/// Column name for an ADC channel, e.g. `ADC3`
pub fn channel_column_name(channel: u8) -> String {
    format!("{}{}", ADC_PREFIX, channel)
}

/// Channel index of an `ADC<n>` column name
pub fn parse_channel_column(name: &str) -> Option<u8> {
    let digits = name.strip_prefix(ADC_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
