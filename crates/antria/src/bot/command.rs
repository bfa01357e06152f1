//! Idle-state command vocabulary.
//!
//! Keyword strings are a user-visible contract; matching is
//! case-insensitive and exact, no stemming or partial matches.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show the welcome menu.
    Menu,
    /// Start patient registration.
    Register,
    /// Browse department schedules.
    DepartmentSchedules,
    /// Browse doctor schedules.
    DoctorSchedules,
    /// Start the reservation flow.
    Reserve,
    /// Show active reservations.
    QueueStatus,
    /// Start reservation cancellation.
    CancelReservation,
    /// Show usage help.
    Help,
}

pub const COMMANDS: &[(&str, Command)] = &[
    ("MENU", Command::Menu),
    ("START", Command::Menu),
    ("MULAI", Command::Menu),
    ("HI", Command::Menu),
    ("HALO", Command::Menu),
    ("DAFTAR", Command::Register),
    ("JADWAL", Command::DepartmentSchedules),
    ("JADWAL DOKTER", Command::DoctorSchedules),
    ("RESERVASI", Command::Reserve),
    ("CEK ANTRIAN", Command::QueueStatus),
    ("CEK", Command::QueueStatus),
    ("ANTRIAN", Command::QueueStatus),
    ("BATAL", Command::CancelReservation),
    ("BANTUAN", Command::Help),
    ("HELP", Command::Help),
];

pub fn lookup(text: &str) -> Option<Command> {
    let keyword = text.trim().to_uppercase();
    COMMANDS
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, command)| *command)
}

/// Commands honored from every non-idle state, before any in-flow parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideCommand {
    /// `BATAL` / `CANCEL`: abort the flow with an acknowledgement.
    Abort,
    /// `MENU`: abort the flow and show the welcome menu.
    Menu,
}

pub fn lookup_override(text: &str) -> Option<OverrideCommand> {
    match text.trim().to_uppercase().as_str() {
        "BATAL" | "CANCEL" => Some(OverrideCommand::Abort),
        "MENU" => Some(OverrideCommand::Menu),
        _ => None,
    }
}
