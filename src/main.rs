use metaball_field::app::App;
use metaball_field::error::{EventLoopSnafu, PresenterError};
use snafu::ResultExt as _;
use winit::event_loop::EventLoop;

fn main() -> Result<(), PresenterError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new().context(EventLoopSnafu)?;
    let mut app = App::new();
    event_loop.run_app(&mut app).context(EventLoopSnafu)?;

    app.into_result()
}
