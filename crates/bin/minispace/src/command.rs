//! Console commands: one per input line.

use std::str::FromStr;

use minispace_domain::device::{DeviceKind, DeviceStatus, SlotNumber, SlotRequest};
use minispace_domain::error::ParseError;
use minispace_domain::geometry::{CanvasSize, MAX_SIDE, Pixel};
use minispace_domain::id::DeviceId;
use minispace_domain::label::WatchedProperty;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(DeviceKind),
    Delete(DeviceId),
    Status(DeviceId, DeviceStatus),
    Connect(DeviceId, DeviceId, SlotRequest),
    Disconnect(DeviceId, DeviceId),
    Pending(DeviceId),
    Tap(DeviceId),
    Cancel,
    Drag(DeviceId, i32, i32),
    Drop(DeviceId, Pixel),
    Resize(CanvasSize),
    Rename(DeviceId, String),
    Comment(DeviceId, String),
    Watch(DeviceId, WatchedProperty),
    Label(DeviceId),
    List,
    Lines,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),
    #[error("missing argument <{0}>")]
    Missing(&'static str),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("expected a number, got {0:?}")]
    Number(String),
    #[error("slot numbers start at 1")]
    ZeroSlot,
    #[error("canvas {width}x{height} is out of range, sides go from 1 to {max}", max = MAX_SIDE)]
    Canvas { width: u32, height: u32 },
}

pub const HELP: &str = "\
add <KIND>                       KIND: RPI LED TEMPSENSOR BULB LAMP THERMOMETER
delete <ID>
status <ID> <ON|OFF>
connect <HUB> <ID> [SLOT]
disconnect <HUB> <ID>
pending <HUB>                    start toggling links by tapping devices
tap <ID>
cancel                           leave pending mode
drag <ID> <DX> <DY>
drop <ID> <X> <Y>
resize <W> <H>
rename <ID> <NAME...>
comment <ID> <TEXT...>
watch <ID> <connection|position|status>
label <ID>
list
lines
quit";

struct Args<'a> {
    words: std::str::SplitWhitespace<'a>,
    rest: &'a str,
}

impl<'a> Args<'a> {
    fn new(rest: &'a str) -> Self {
        Self {
            words: rest.split_whitespace(),
            rest,
        }
    }

    fn word(&mut self, name: &'static str) -> Result<&'a str, CommandError> {
        let word = self.words.next().ok_or(CommandError::Missing(name))?;
        let consumed = word.as_ptr() as usize - self.rest.as_ptr() as usize + word.len();
        self.rest = &self.rest[consumed..];
        self.words = self.rest.split_whitespace();
        Ok(word)
    }

    fn parse<T>(&mut self, name: &'static str) -> Result<T, CommandError>
    where
        T: FromStr<Err = ParseError>,
    {
        Ok(self.word(name)?.parse()?)
    }

    fn number<T: FromStr>(&mut self, name: &'static str) -> Result<T, CommandError> {
        let word = self.word(name)?;
        word.parse().map_err(|_| CommandError::Number(word.to_string()))
    }

    fn text(self, name: &'static str) -> Result<String, CommandError> {
        let text = self.rest.trim();
        if text.is_empty() {
            return Err(CommandError::Missing(name));
        }
        Ok(text.to_string())
    }

    fn canvas(&mut self) -> Result<CanvasSize, CommandError> {
        let canvas = CanvasSize::new(self.number("W")?, self.number("H")?);
        if !canvas.is_drawable() {
            return Err(CommandError::Canvas {
                width: canvas.width,
                height: canvas.height,
            });
        }
        Ok(canvas)
    }

    fn slot(&mut self) -> Result<SlotRequest, CommandError> {
        if self.words.clone().next().is_none() {
            return Ok(SlotRequest::Auto);
        }
        let value: u32 = self.number("SLOT")?;
        SlotNumber::new(value)
            .map(SlotRequest::Explicit)
            .ok_or(CommandError::ZeroSlot)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let mut args = Args::new(rest);
        let command = match name.to_ascii_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "add" => Self::Add(args.parse("KIND")?),
            "delete" => Self::Delete(args.parse("ID")?),
            "status" => Self::Status(args.parse("ID")?, args.parse("STATUS")?),
            "connect" => Self::Connect(args.parse("HUB")?, args.parse("ID")?, args.slot()?),
            "disconnect" => Self::Disconnect(args.parse("HUB")?, args.parse("ID")?),
            "pending" => Self::Pending(args.parse("HUB")?),
            "tap" => Self::Tap(args.parse("ID")?),
            "cancel" => Self::Cancel,
            "drag" => Self::Drag(args.parse("ID")?, args.number("DX")?, args.number("DY")?),
            "drop" => {
                let id = args.parse("ID")?;
                Self::Drop(id, Pixel::new(args.number("X")?, args.number("Y")?))
            }
            "resize" => Self::Resize(args.canvas()?),
            "rename" => {
                let id = args.parse("ID")?;
                Self::Rename(id, args.text("NAME")?)
            }
            "comment" => {
                let id = args.parse("ID")?;
                Self::Comment(id, args.text("TEXT")?)
            }
            "watch" => Self::Watch(args.parse("ID")?, args.parse("PROPERTY")?),
            "label" => Self::Label(args.parse("ID")?),
            "list" => Self::List,
            "lines" => Self::Lines,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}
