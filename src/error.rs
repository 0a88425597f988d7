// Errors for the typed button/pad vocabulary.
// Everything else in the crate is total and never fails.

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Button index outside 0..=11
    #[error("invalid button index {0}")]
    InvalidButton(u8),
    /// Pad index other than 0 or 1
    #[error("invalid pad index {0}")]
    InvalidPad(u8),
}
