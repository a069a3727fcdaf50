use tracing::Level;
use tracing_chrome::{ChromeLayerBuilder, FlushGuard};
use tracing_subscriber::{filter::LevelFilter, prelude::*};

/// Maps a `-v` count to the most verbose level logged to stderr.
pub fn verbosity(occurrences: u8) -> Level {
    match occurrences {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber: log lines up to `level` on stderr, plus a
/// trace for chrome://tracing or https://ui.perfetto.dev/ when `chrome` is set.
///
/// Make sure to store the returned guard in a variable in the scope to be instrumented, otherwise
/// the trace will be flushed and disabled immediately.
pub fn init(level: Level, chrome: bool) -> Option<FlushGuard> {
    let (chrome_layer, guard) = if chrome {
        let (layer, guard) = ChromeLayerBuilder::new().build();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(LevelFilter::from_level(level));

    tracing_subscriber::registry()
        .with(chrome_layer)
        .with(log_layer)
        .init();

    guard
}
