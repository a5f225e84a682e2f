//! Integration tests for OutputBank over embedded-hal pins

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use led_chaser::{OutputBank, OutputError, OutputId, OutputState, PinOutputs};

#[derive(Debug)]
struct MockPin {
    high: bool,
    writes: usize,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

fn pins() -> [MockPin; 3] {
    [
        MockPin { high: true, writes: 0 },
        MockPin { high: true, writes: 0 },
        MockPin { high: true, writes: 0 },
    ]
}

#[test]
fn bank_drives_pins_low_on_creation() {
    let bank = OutputBank::new(PinOutputs::new(pins()));
    let [a, b, c] = bank.into_driver().into_inner();

    assert!(!a.high && !b.high && !c.high);
    assert_eq!(a.writes, 1);
}

#[test]
fn set_and_toggle_reach_the_right_pin() {
    let mut bank = OutputBank::new(PinOutputs::new(pins()));

    bank.set(OutputId(2), OutputState::On).unwrap();
    assert_eq!(bank.toggle(OutputId(3)), Ok(OutputState::On));
    assert_eq!(bank.toggle(OutputId(2)), Ok(OutputState::Off));

    let [a, b, c] = bank.into_driver().into_inner();
    assert!(!a.high);
    assert!(!b.high);
    assert!(c.high);
    assert_eq!(b.writes, 3);
}

#[test]
fn invalid_id_leaves_pins_untouched() {
    let mut bank = OutputBank::new(PinOutputs::new(pins()));

    assert_eq!(
        bank.set(OutputId(0), OutputState::On),
        Err(OutputError::InvalidId(OutputId(0)))
    );
    let pins = bank.into_driver().into_inner();
    assert!(pins.iter().all(|pin| pin.writes == 1));
}

