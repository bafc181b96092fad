/// Output connection to a Sphero robot.
pub trait Sphero: Send + Sync {
    /// Set the main LED colour.
    fn set_rgb(&self, r: u8, g: u8, b: u8);
    /// Roll at `speed` towards `heading` degrees (`0..360`).
    fn roll(&self, speed: u8, heading: u16);
}
