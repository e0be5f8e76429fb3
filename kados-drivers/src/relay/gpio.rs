//! GPIO relay switching
//!
//! Drives a relay module (sanitizer pump, reward dispenser, LED strip
//! supply) through a GPIO pin, directly or via a transistor stage.

use embedded_hal::digital::OutputPin;

/// GPIO relay output
///
/// The pin can be configured as active-high (default) or active-low for
/// relay boards with inverted inputs.
pub struct GpioRelay<P> {
    pin: P,
    /// If true, relay ON = pin LOW
    inverted: bool,
    /// Current logical state (true = energized)
    on: bool,
}

impl<P: OutputPin> GpioRelay<P> {
    /// Create a relay output, driving it to the released state
    pub fn new(mut pin: P, inverted: bool) -> Result<Self, P::Error> {
        // Ensure the relay starts released
        if inverted {
            pin.set_high()?;
        } else {
            pin.set_low()?;
        }

        Ok(Self {
            pin,
            inverted,
            on: false,
        })
    }

    /// Create a relay with active-high drive
    pub fn new_active_high(pin: P) -> Result<Self, P::Error> {
        Self::new(pin, false)
    }

    /// Create a relay with active-low drive
    pub fn new_active_low(pin: P) -> Result<Self, P::Error> {
        Self::new(pin, true)
    }

    /// Energize or release the relay
    pub fn set_on(&mut self, on: bool) -> Result<(), P::Error> {
        if on != self.inverted {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }

        self.on = on;
        Ok(())
    }

    /// Check if the relay is energized
    pub fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_active_high_relay() {
        let pin = MockPin { high: true };
        let mut relay = GpioRelay::new_active_high(pin).unwrap();

        // Construction releases the relay
        assert!(!relay.is_on());
        assert!(!relay.pin.high);

        relay.set_on(true).unwrap();
        assert!(relay.is_on());
        assert!(relay.pin.high);

        relay.set_on(false).unwrap();
        assert!(!relay.is_on());
        assert!(!relay.pin.high);
    }

    #[test]
    fn test_active_low_relay() {
        let pin = MockPin { high: false };
        let mut relay = GpioRelay::new_active_low(pin).unwrap();

        // Released means pin high for active-low boards
        assert!(!relay.is_on());
        assert!(relay.pin.high);

        relay.set_on(true).unwrap();
        assert!(relay.is_on());
        assert!(!relay.pin.high);
    }
}
