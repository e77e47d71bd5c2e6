//! Export orchestration: request model, clocks, cancellation, the capture state machine and the
//! exporter that runs it.

/// Cooperative cancellation.
pub mod cancel;
/// Capture session state machine.
pub mod capture;
/// Frame clocks driving the sampling loop.
pub mod clock;
/// Exporter entry points, status events and artifacts.
pub mod exporter;
/// Render requests and export settings.
pub mod request;
