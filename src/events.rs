/// Input understood by the visualizer, independent of where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary pointer click at a page-relative position
    Click { x: f64, y: f64 },

    /// Toggle the animation
    PlayPause,

    /// Show or hide grid lines
    ToggleGridlines,

    /// The screen changed size and needs to be repainted
    Resize,

    /// Exit the application
    Exit,
}
