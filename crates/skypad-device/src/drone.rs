/// Output connection to a drone.
///
/// Every call is fire-and-forget: implementations own session setup,
/// retries and error reporting, and never block the caller.
pub trait Drone: Send + Sync {
    fn forward(&self, magnitude: u8);
    fn backward(&self, magnitude: u8);
    fn left(&self, magnitude: u8);
    fn right(&self, magnitude: u8);
    fn up(&self, magnitude: u8);
    fn down(&self, magnitude: u8);
    fn clockwise(&self, magnitude: u8);
    fn counter_clockwise(&self, magnitude: u8);
    fn take_off(&self);
    fn land(&self);

    /// Ask the drone to stream its camera. No-op by default.
    fn start_video(&self) {}
}
