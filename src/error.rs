/// Display and input errors
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<S, P> {
    /// Shifting a frame out failed
    Spi(S),
    /// Driving the latch or reading the encoder failed
    Pin(P),
}
