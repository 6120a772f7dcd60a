#![forbid(unsafe_code)]

use log::{info, warn, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::env;

use crate::utils::errors::Errors;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Networking.
const ENV_HTTP_PORT        : &str = "PORT";
const DEFAULT_HTTP_ADDR    : &str = "0.0.0.0";
const DEFAULT_HTTP_PORT    : u16  = 8080;

// The fixed text returned by the root route.
const DEFAULT_GREETING     : &str = "Hello World!! I am first!";

// Console log line layout.
const LOG_PATTERN          : &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct Config {
    pub http_addr: String,
    pub http_port: u16,
    pub greeting: String,
}

impl Config {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Config::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// resolve_config:
// ---------------------------------------------------------------------------
/** Assemble the runtime configuration from the process environment.  Only
 * the listen port is configurable; the bind address and the greeting are
 * fixed at build time.  The returned value is immutable for the life of
 * the process and is passed explicitly to whatever needs it.
 */
pub fn resolve_config() -> Config {
    Config {
        http_port: get_listen_port(),
        ..Config::default()
    }
}

// ---------------------------------------------------------------------------
// get_listen_port:
// ---------------------------------------------------------------------------
/** Read the listen port from the environment. */
fn get_listen_port() -> u16 {
    parse_port(env::var(ENV_HTTP_PORT).ok())
}

// ---------------------------------------------------------------------------
// parse_port:
// ---------------------------------------------------------------------------
/** Coerce a raw PORT value into a usable port number.  Absent, empty and
 * malformed values all fall back to the default port.  Numbers outside the
 * u16 range fail parsing and are treated the same as non-numeric text.
 */
fn parse_port(raw: Option<String>) -> u16 {
    match raw {
        Some(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return DEFAULT_HTTP_PORT;
            }
            match trimmed.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    warn!("Ignoring malformed {} value {:?}, using port {}.",
                          ENV_HTTP_PORT, s, DEFAULT_HTTP_PORT);
                    DEFAULT_HTTP_PORT
                },
            }
        },
        None => DEFAULT_HTTP_PORT,
    }
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Initialize log4rs logging with a console appender.  The server takes no
 * configuration files, so the logging configuration is built in code
 * instead of being read from a log4rs yaml file.
 *
 * Any failure results in a panic.
 */
pub fn init_log() {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let logconfig = LogConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info));
    let logconfig = match logconfig {
        Ok(c) => c,
        Err(e) => {
            println!("{}", e);
            panic!("{}", Errors::Log4rsInitialization(e.to_string()));
        },
    };
    match log4rs::init_config(logconfig) {
        Ok(_) => (),
        Err(e) => {
            println!("{}", e);
            panic!("{}", Errors::Log4rsInitialization(e.to_string()));
        },
    }
    info!("Log4rs initialized with console logging.");
}
