//! Line commands accepted by the terminal dashboard.

use std::str::FromStr;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `room <id>`
    Room(String),
    /// `toggle <device>`
    Toggle(String),
    /// `on <device>` / `off <device>`
    Power { device: String, on: bool },
    /// `brightness <device> <n>`
    Brightness { device: String, value: u8 },
    /// `temp <device> <n>`
    Temperature { device: String, value: i32 },
    /// `unit`
    ToggleUnit,
    /// `theme`
    ToggleTheme,
    /// `city <name>`, the name may contain spaces.
    City(String),
    /// `cities`
    Cities,
    /// `show`
    Show,
    /// `help`
    Help,
    /// `quit` / `exit`
    Quit,
}

/// Usage text printed by `help`.
pub const HELP: &str = "\
commands:
  room <id>                 select a room
  toggle <device>           flip a device on or off
  on <device> | off <device>
  brightness <device> <n>   set a light's brightness (0-100)
  temp <device> <n>         set a set-point
  unit                      switch between °C and °F
  theme                     switch between dark and light
  city <name>               show the weather for another city
  cities                    list suggested cities
  show                      redraw the dashboard
  quit";

/// Reasons an input line is not a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("{value:?} is not a valid {field}")]
    InvalidNumber { field: &'static str, value: String },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };
        let mut arg = |command: &'static str, expected: &'static str| {
            words
                .next()
                .map(str::to_string)
                .ok_or(CommandError::MissingArgument { command, expected })
        };

        match verb.to_ascii_lowercase().as_str() {
            "room" => Ok(Self::Room(arg("room", "a room id")?)),
            "toggle" => Ok(Self::Toggle(arg("toggle", "a device id")?)),
            "on" => Ok(Self::Power {
                device: arg("on", "a device id")?,
                on: true,
            }),
            "off" => Ok(Self::Power {
                device: arg("off", "a device id")?,
                on: false,
            }),
            "brightness" => {
                let device = arg("brightness", "a device id and a level")?;
                let value = number("brightness", &arg("brightness", "a level")?)?;
                Ok(Self::Brightness { device, value })
            }
            "temp" => {
                let device = arg("temp", "a device id and a temperature")?;
                let value = number("temperature", &arg("temp", "a temperature")?)?;
                Ok(Self::Temperature { device, value })
            }
            "unit" => Ok(Self::ToggleUnit),
            "theme" => Ok(Self::ToggleTheme),
            "city" => {
                let name = line.trim_start()[verb.len()..].trim();
                if name.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "city",
                        expected: "a city name",
                    });
                }
                Ok(Self::City(name.to_string()))
            }
            "cities" => Ok(Self::Cities),
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(verb.to_string())),
        }
    }
}

fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
