use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static LOGGER: StandardLogger = StandardLogger;

const PARENS_COLOR: Color = Color::Rgb(0x7f, 0x8c, 0x8d);

/// Writes log records to stderr, so stdout only carries command output.
pub struct StandardLogger;

impl StandardLogger {
    pub fn setup(verbosity: u8) -> Result<(), SetLoggerError> {
        let level = match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
    }

    fn get_level_color(level: Level) -> Color {
        match level {
            Level::Debug => Color::Cyan,
            Level::Trace => Color::Magenta,
            Level::Info => Color::Green,
            Level::Warn => Color::Yellow,
            Level::Error => Color::Red,
        }
    }

    fn write_record(&self, record: &Record) -> io::Result<()> {
        let mut stream = StandardStream::stderr(ColorChoice::Auto);

        stream.set_color(ColorSpec::new().set_fg(Some(PARENS_COLOR)))?;
        write!(&mut stream, "[ ")?;

        stream.set_color(ColorSpec::new().set_fg(Some(Self::get_level_color(record.level()))))?;
        write!(&mut stream, "{:>5} {:>18}", record.level(), record.target())?;

        stream.set_color(ColorSpec::new().set_fg(Some(PARENS_COLOR)))?;
        write!(&mut stream, " ] ")?;

        stream.reset()?;
        writeln!(&mut stream, "{}", record.args())
    }
}

impl Log for StandardLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // a broken stderr leaves nowhere to report to
            let _ = self.write_record(record);
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
