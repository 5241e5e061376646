//! `embedded-hal` 0.2 backed [`Pin`] implementations
//!
//! HAL pins are typed by mode, so each adapter accepts only the modes its
//! wrapped type already is. HAL error types are collapsed into
//! [`PinError::Hardware`]; their detail is HAL specific and the drivers only
//! log it.

use core::marker::PhantomData;

use embedded_hal::adc::{Channel, OneShot};
use embedded_hal::digital::v2::{InputPin, OutputPin};

use super::{Level, Pin, PinMode};
use crate::errors::{PinError, PinResult};

/// Push-pull output pin (relay coil, LEDs, buzzer)
///
/// Remembers the last level written so `read_digital` works without
/// requiring `StatefulOutputPin` from the HAL.
#[derive(Debug)]
pub struct OutputAdapter<P> {
    pin: P,
    level: Level,
}

impl<P: OutputPin> OutputAdapter<P> {
    /// Wrap a HAL output pin, driving it low
    pub fn new(mut pin: P) -> Self {
        if pin.set_low().is_err() {
            log_warn!("output pin refused initial low level");
        }
        Self { pin, level: Level::Low }
    }

    /// Give the HAL pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Pin for OutputAdapter<P> {
    fn set_mode(&mut self, mode: PinMode) -> PinResult<()> {
        match mode {
            PinMode::Output => Ok(()),
            _ => Err(PinError::InvalidMode),
        }
    }

    fn write_digital(&mut self, level: Level) -> PinResult<()> {
        let result = match level {
            Level::High => self.pin.set_high(),
            Level::Low => self.pin.set_low(),
        };
        result.map_err(|_| PinError::Hardware)?;
        self.level = level;
        Ok(())
    }

    fn read_digital(&self) -> PinResult<Level> {
        Ok(self.level)
    }

    fn read_analog(&mut self) -> nb::Result<u16, PinError> {
        Err(nb::Error::Other(PinError::Unsupported))
    }
}

/// Digital input pin (override button)
///
/// Pull resistors are part of the HAL pin's type, so both input modes are
/// accepted as-is.
#[derive(Debug)]
pub struct InputAdapter<P> {
    pin: P,
}

impl<P: InputPin> InputAdapter<P> {
    /// Wrap a HAL input pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Give the HAL pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> Pin for InputAdapter<P> {
    fn set_mode(&mut self, mode: PinMode) -> PinResult<()> {
        if mode.is_input() {
            Ok(())
        } else {
            Err(PinError::InvalidMode)
        }
    }

    fn write_digital(&mut self, _level: Level) -> PinResult<()> {
        Err(PinError::Unsupported)
    }

    fn read_digital(&self) -> PinResult<Level> {
        self.pin
            .is_high()
            .map(Level::from)
            .map_err(|_| PinError::Hardware)
    }

    fn read_analog(&mut self) -> nb::Result<u16, PinError> {
        Err(nb::Error::Other(PinError::Unsupported))
    }
}

/// Analog input sampled through a one-shot ADC (battery sense)
pub struct AdcAdapter<ADC, A, P> {
    adc: A,
    pin: P,
    _adc: PhantomData<ADC>,
}

impl<ADC, A, P> AdcAdapter<ADC, A, P>
where
    P: Channel<ADC>,
    A: OneShot<ADC, u16, P>,
{
    /// Pair an ADC peripheral with the channel pin it samples
    pub fn new(adc: A, pin: P) -> Self {
        Self { adc, pin, _adc: PhantomData }
    }

    /// Give the ADC and pin back
    pub fn release(self) -> (A, P) {
        (self.adc, self.pin)
    }
}

impl<ADC, A, P> Pin for AdcAdapter<ADC, A, P>
where
    P: Channel<ADC>,
    A: OneShot<ADC, u16, P>,
{
    fn set_mode(&mut self, mode: PinMode) -> PinResult<()> {
        match mode {
            PinMode::Analog | PinMode::Input => Ok(()),
            _ => Err(PinError::InvalidMode),
        }
    }

    fn write_digital(&mut self, _level: Level) -> PinResult<()> {
        Err(PinError::Unsupported)
    }

    fn read_digital(&self) -> PinResult<Level> {
        Err(PinError::Unsupported)
    }

    fn read_analog(&mut self) -> nb::Result<u16, PinError> {
        self.adc
            .read(&mut self.pin)
            .map_err(|e| e.map(|_| PinError::Hardware))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;

    struct FakeOutput {
        high: bool,
    }

    impl OutputPin for FakeOutput {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    struct BrokenOutput;

    impl OutputPin for BrokenOutput {
        type Error = ();

        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(())
        }
    }

    struct FakeInput {
        high: bool,
    }

    impl InputPin for FakeInput {
        type Error = Infallible;

        fn is_high(&self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_low(&self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    struct FakeAdc;
    struct FakeChannel;

    impl Channel<FakeAdc> for FakeChannel {
        type ID = u8;

        fn channel() -> u8 {
            0
        }
    }

    /// Needs one poll before every conversion completes
    struct SlowAdc {
        busy: Cell<bool>,
        counts: u16,
    }

    impl OneShot<FakeAdc, u16, FakeChannel> for SlowAdc {
        type Error = ();

        fn read(&mut self, _pin: &mut FakeChannel) -> nb::Result<u16, Self::Error> {
            if self.busy.replace(false) {
                Err(nb::Error::WouldBlock)
            } else {
                self.busy.set(true);
                Ok(self.counts)
            }
        }
    }

    #[test]
    fn output_adapter_drives_pin() {
        let mut pin = OutputAdapter::new(FakeOutput { high: true });
        assert_eq!(pin.read_digital(), Ok(Level::Low));

        pin.write_digital(Level::High).unwrap();
        assert_eq!(pin.read_digital(), Ok(Level::High));
        assert!(pin.release().high);
    }

    #[test]
    fn output_adapter_rejects_input_modes() {
        let mut pin = OutputAdapter::new(FakeOutput { high: false });
        assert_eq!(pin.set_mode(PinMode::Output), Ok(()));
        assert_eq!(pin.set_mode(PinMode::InputPullUp), Err(PinError::InvalidMode));
        assert_eq!(
            pin.read_analog(),
            Err(nb::Error::Other(PinError::Unsupported))
        );
    }

    #[test]
    fn output_adapter_reports_hal_fault() {
        let mut pin = OutputAdapter::new(BrokenOutput);
        assert_eq!(pin.write_digital(Level::High), Err(PinError::Hardware));
        // Level only changes once the HAL accepted it
        assert_eq!(pin.read_digital(), Ok(Level::Low));
    }

    #[test]
    fn input_adapter_reads_level() {
        let mut pin = InputAdapter::new(FakeInput { high: false });
        assert_eq!(pin.set_mode(PinMode::InputPullUp), Ok(()));
        assert_eq!(pin.read_digital(), Ok(Level::Low));
        assert_eq!(pin.write_digital(Level::High), Err(PinError::Unsupported));
    }

    #[test]
    fn adc_adapter_polls_until_ready() {
        let mut pin = AdcAdapter::new(
            SlowAdc { busy: Cell::new(true), counts: 512 },
            FakeChannel,
        );
        assert_eq!(pin.set_mode(PinMode::Analog), Ok(()));
        assert_eq!(pin.read_analog(), Err(nb::Error::WouldBlock));
        assert_eq!(nb::block!(pin.read_analog()), Ok(512));
    }
}
