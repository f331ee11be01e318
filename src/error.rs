//! Errors raised while setting up or driving the presenter.
//
// The field pipeline itself is infallible; only the window and GPU plumbing can fail.

/// All the known errors returned by the presenter.
#[derive(Debug, snafu::Snafu)]
#[snafu(visibility(pub))]
pub enum PresenterError {
    #[snafu(display("Couldn't create the event loop"))]
    /// The windowing system refused to start an event loop
    EventLoop {
        /// The parent error type
        source: winit::error::EventLoopError,
    },

    #[snafu(display("Couldn't create the window"))]
    /// The OS refused to open a window
    Window {
        /// The parent error type
        source: winit::error::OsError,
    },

    #[snafu(display("Couldn't create a drawing surface for the window"))]
    /// wgpu couldn't attach to the window
    Surface {
        /// The parent error type
        source: wgpu::CreateSurfaceError,
    },

    #[snafu(display("No GPU adapter is compatible with the window surface"))]
    /// No adapter could present to the surface
    NoAdapter,

    #[snafu(display("Couldn't acquire a GPU device"))]
    /// The adapter refused to hand out a device
    Device {
        /// The parent error type
        source: wgpu::RequestDeviceError,
    },

    #[snafu(display("The window surface isn't supported by the {adapter} adapter"))]
    /// The adapter has no configuration for the surface
    UnsupportedSurface {
        /// Name of the adapter that was tried
        adapter: String,
    },
}
