//! The UI surface the flows drive.
//!
//! Everything here runs on one logical thread, so implementations use
//! interior mutability behind `&self` and are shared as `Rc<dyn ...>`.

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::markup::TableRow;

/// Visual classification of a rendered message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    Ok,
    Warn,
    Ng,
    Neutral,
}

impl Tone {
    /// Style class applied to the target; `Neutral` applies none.
    pub fn class_name(&self) -> Option<&'static str> {
        match self {
            Self::Ok => Some("ok"),
            Self::Warn => Some("warn"),
            Self::Ng => Some("ng"),
            Self::Neutral => None,
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class_name().unwrap_or("neutral"))
    }
}

/// A region that displays one message at a time.
pub trait TextRegion {
    /// Replace the displayed text and its tone in one step.
    fn show(&self, text: &str, tone: Tone);
}

/// A control that starts an action (a button, a submit, a console verb).
pub trait TriggerControl {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn set_enabled(&self, enabled: bool);
    fn is_enabled(&self) -> bool;
}

/// The registry table. Rows arrive with every cell already escaped.
pub trait RecordTable {
    fn replace_rows(&self, rows: Vec<TableRow>);
}

/// A binary on/off indicator (backend online, anchor ready).
pub trait Indicator {
    fn set_active(&self, active: bool);
}

#[async_trait(?Send)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> ClientResult<()>;
}
