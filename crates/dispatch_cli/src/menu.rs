//! Interactive six-action menu driving a [`DispatchCore`].
//!
//! Generic over input and output so scripted sessions can be tested without a terminal.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use dispatch_core::{DispatchCore, Point, RideId, RiderId};

use crate::render::{render_error, render_event, render_ride_summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    RegisterRider,
    RegisterDriver,
    RequestRide,
    CompleteRide,
    ListRides,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 6] = [
        MenuAction::RegisterRider,
        MenuAction::RegisterDriver,
        MenuAction::RequestRide,
        MenuAction::CompleteRide,
        MenuAction::ListRides,
        MenuAction::Quit,
    ];

    pub fn parse(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(MenuAction::RegisterRider),
            "2" => Some(MenuAction::RegisterDriver),
            "3" => Some(MenuAction::RequestRide),
            "4" => Some(MenuAction::CompleteRide),
            "5" => Some(MenuAction::ListRides),
            "6" => Some(MenuAction::Quit),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::RegisterRider => "Register rider",
            MenuAction::RegisterDriver => "Register driver",
            MenuAction::RequestRide => "Request ride",
            MenuAction::CompleteRide => "Complete ride",
            MenuAction::ListRides => "List rides",
            MenuAction::Quit => "Quit",
        }
    }
}

/// Why an action was abandoned before reaching the core.
#[derive(Debug)]
enum InputError {
    /// Input ended mid-action; the session is over.
    Eof,
    /// The user typed something that does not parse; report and return to the menu.
    Invalid(String),
    Io(io::Error),
}

impl From<io::Error> for InputError {
    fn from(error: io::Error) -> Self {
        InputError::Io(error)
    }
}

pub struct Menu<'a, R, W> {
    core: &'a DispatchCore,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(core: &'a DispatchCore, input: R, output: W) -> Self {
        Self {
            core,
            input,
            output,
        }
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                log::debug!("input closed; leaving menu");
                return Ok(());
            };

            let Some(action) = MenuAction::parse(&choice) else {
                writeln!(self.output, "Invalid choice")?;
                continue;
            };
            if action == MenuAction::Quit {
                return Ok(());
            }

            match self.perform(action) {
                Ok(()) => {}
                Err(InputError::Invalid(message)) => writeln!(self.output, "{message}")?,
                Err(InputError::Eof) => {
                    self.flush_events()?;
                    return Ok(());
                }
                Err(InputError::Io(error)) => return Err(error),
            }
            self.flush_events()?;
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Ride Dispatch ---")?;
        for (i, action) in MenuAction::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, action.label())?;
        }
        Ok(())
    }

    fn perform(&mut self, action: MenuAction) -> Result<(), InputError> {
        match action {
            MenuAction::RegisterRider => {
                let name = self.read_text("Rider name: ")?;
                self.core.register_rider(name);
            }
            MenuAction::RegisterDriver => {
                let name = self.read_text("Driver name: ")?;
                let start = self.read_point("Driver start X: ", "Driver start Y: ")?;
                self.core.register_driver(name, start.x, start.y);
            }
            MenuAction::RequestRide => {
                let rider_id = RiderId(self.read_parsed::<u64>("Rider ID: ")?);
                let start = self.read_point("Start X: ", "Start Y: ")?;
                let destination = self.read_point("Destination X: ", "Destination Y: ")?;
                if let Err(error) = self.core.request_ride(rider_id, start, destination) {
                    writeln!(self.output, "{}", render_error(&error))?;
                }
            }
            MenuAction::CompleteRide => {
                let ride_id = RideId(self.read_parsed::<u64>("Ride ID: ")?);
                if let Err(error) = self.core.complete_ride(ride_id) {
                    writeln!(self.output, "{}", render_error(&error))?;
                }
            }
            MenuAction::ListRides => {
                let rides = self.core.list_rides();
                if rides.is_empty() {
                    writeln!(self.output, "No rides yet")?;
                }
                for row in &rides {
                    writeln!(self.output, "{}", render_ride_summary(row))?;
                }
            }
            MenuAction::Quit => {}
        }
        Ok(())
    }

    fn flush_events(&mut self) -> io::Result<()> {
        for event in self.core.drain_events() {
            writeln!(self.output, "{}", render_event(&event))?;
        }
        self.output.flush()
    }

    /// Print `label`, then read one line without its trailing newline. `None` on end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn read_text(&mut self, label: &str) -> Result<String, InputError> {
        self.prompt(label)?.ok_or(InputError::Eof)
    }

    fn read_parsed<T: FromStr>(&mut self, label: &str) -> Result<T, InputError> {
        let raw = self.read_text(label)?;
        raw.trim()
            .parse()
            .map_err(|_| InputError::Invalid(format!("Invalid number: {:?}", raw.trim())))
    }

    fn read_point(&mut self, x_label: &str, y_label: &str) -> Result<Point, InputError> {
        let point = Point::new(self.read_parsed(x_label)?, self.read_parsed(y_label)?);
        if !point.is_finite() {
            return Err(InputError::Invalid(format!(
                "Invalid number: coordinates must be finite (got {point})"
            )));
        }
        Ok(point)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use dispatch_core::DriverId;

    use super::*;

    fn run_script(core: &DispatchCore, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(core, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .expect("menu run");
        String::from_utf8(output).expect("utf8 output")
    }

    #[test]
    fn parses_all_six_choices() {
        let parsed: Vec<_> = ["1", "2", "3", "4", "5", " 6 "]
            .iter()
            .map(|choice| MenuAction::parse(choice))
            .collect();
        assert_eq!(parsed, MenuAction::ALL.map(Some).to_vec());
        assert_eq!(MenuAction::parse("7"), None);
        assert_eq!(MenuAction::parse(""), None);
    }

    #[test]
    fn full_session_renders_every_success_event() {
        let core = DispatchCore::new();
        let output = run_script(
            &core,
            "1\nAna\n2\nBo\n0\n0\n3\n1\n0\n0\n1\n0\n5\n4\n1\n5\n6\n",
        );

        assert!(output.contains("Registered rider Ana with ID 1"));
        assert!(output.contains("Registered driver Bo with ID 1 at location (0, 0)"));
        assert!(output.contains("Ride 1 started with driver Bo. Fare will be 350.00"));
        assert!(output.contains("Ride 1 (active): Rider Ana -> Driver Bo"));
        assert!(output.contains("Ride 1 completed. Fare was 350.00"));
        assert!(output.contains("Ride 1 (completed): Rider Ana -> Driver Bo"));
    }

    #[test]
    fn failures_are_reported_and_loop_continues() {
        let core = DispatchCore::new();
        let output = run_script(
            &core,
            "3\n9\n0\n0\n1\n1\n1\nAna\n3\n1\n0\n0\n1\n1\n4\n5\n6\n",
        );

        assert!(output.contains("Rider not found (ID 9)"));
        assert!(output.contains("No available drivers"));
        assert!(output.contains("Ride not found (ID 5)"));
        assert!(output.contains("Registered rider Ana with ID 1"));
    }

    #[test]
    fn double_completion_is_reported() {
        let core = DispatchCore::new();
        let rider = core.register_rider("Ana").id;
        core.register_driver("Bo", 0.0, 0.0);
        core.request_ride(rider, Point::new(0.0, 0.0), Point::new(1.0, 0.0))
            .expect("ride");
        core.drain_events();

        let output = run_script(&core, "4\n1\n4\n1\n6\n");

        assert_eq!(output.matches("Ride 1 completed. Fare was 350.00").count(), 1);
        assert!(output.contains("Ride 1 already completed"));
    }

    #[test]
    fn invalid_input_does_not_reach_core() {
        let core = DispatchCore::new();
        let output = run_script(&core, "9\n2\nBo\nabc\n2\nCy\n1\nNaN\n5\n6\n");

        assert!(output.contains("Invalid choice"));
        assert!(output.contains("Invalid number: \"abc\""));
        assert!(output.contains("coordinates must be finite"));
        assert!(output.contains("No rides yet"));
        assert!(core.driver(DriverId(1)).is_none());
    }

    #[test]
    fn end_of_input_quits_cleanly() {
        let core = DispatchCore::new();
        let output = run_script(&core, "2\nBo\n1.5\n");

        assert!(output.ends_with("Driver start Y: "));
        assert!(core.drivers().is_empty());
    }

    #[test]
    fn infinite_pickup_never_reaches_core() {
        let core = DispatchCore::new();
        let rider = core.register_rider("Ana").id;
        core.register_driver("Bo", 0.0, 0.0);
        core.drain_events();

        let output = run_script(&core, &format!("3\n{rider}\ninf\n0\n6\n"));

        assert!(output.contains("coordinates must be finite"));
        assert!(core.list_rides().is_empty());
    }
}
