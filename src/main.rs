//! Timesheet Frontend Entry Point

fn main() {
    timesheet_ui::start();
}
