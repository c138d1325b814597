//! Adafruit Bluefruit services
//!
//! Every service of a Bluefruit Playground board is described by a static [`Service`] table. The
//! table lists the characteristics of the service along with their properties, access, and value
//! format. This library does not contain a GATT server, instead a table is given to the
//! Bluetooth stack through the [`ServiceBinder`] trait.
//!
//! ```
//! # use bo_tie_adafruit::services::{self, Service, ServiceBinder};
//! # use bo_tie_adafruit::characteristic::Characteristic;
//! #[derive(Default)]
//! struct Counter {
//!     services: usize,
//!     characteristics: usize,
//! }
//!
//! impl ServiceBinder for Counter {
//!     type Error = core::convert::Infallible;
//!
//!     fn add_service(&mut self, _: &Service) -> Result<(), Self::Error> {
//!         self.services += 1;
//!         Ok(())
//!     }
//!
//!     fn add_characteristic(&mut self, _: &Service, _: &Characteristic) -> Result<(), Self::Error> {
//!         self.characteristics += 1;
//!         Ok(())
//!     }
//! }
//!
//! let mut counter = Counter::default();
//!
//! services::gesture::SERVICE.bind(&mut counter).unwrap();
//!
//! assert_eq!(1, counter.services);
//! assert_eq!(2, counter.characteristics);
//! ```

pub mod accelerometer;
pub mod addressable_pixel;
pub mod barometric_pressure;
pub mod button;
pub mod color_sensor;
pub mod gesture;
pub mod gyroscope;
pub mod humidity;
pub mod light_sensor;
pub mod magnetometer;
pub mod microphone;
pub mod proximity;
pub mod quaternion;
pub mod temperature;
pub mod tone;

use crate::characteristic::{Access, Characteristic, Properties, ValueFormat};
use crate::transfer::{read_at, TransferFormatError, TransferFormatInto, TransferFormatTryFrom};
use crate::uuid::{adafruit_service_uuid, Uuid};

/// A service table
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Service {
    pub name: &'static str,
    pub uuid: Uuid,
    pub characteristics: &'static [Characteristic],
}

impl Service {
    /// Find a characteristic of this service by its UUID
    pub fn find_characteristic(&self, uuid: Uuid) -> Option<&'static Characteristic> {
        self.characteristics.iter().find(|c| c.uuid == uuid)
    }

    /// Bind this service to a Bluetooth stack
    ///
    /// The service is added with `add_service` followed by every characteristic (in the order of
    /// the table) with `add_characteristic`. Binding stops at the first error.
    pub fn bind<B>(&self, binder: &mut B) -> Result<(), B::Error>
    where
        B: ServiceBinder + ?Sized,
    {
        log::debug!("binding service {} ({})", self.name, self.uuid);

        binder.add_service(self)?;

        for characteristic in self.characteristics {
            binder.add_characteristic(self, characteristic)?;
        }

        Ok(())
    }
}

/// Interface to the GATT server of a Bluetooth stack
///
/// A `ServiceBinder` is implemented by whatever builds the attribute table of the server. The
/// characteristics of a service are always added directly after the service.
pub trait ServiceBinder {
    type Error;

    /// Add a primary service
    fn add_service(&mut self, service: &Service) -> Result<(), Self::Error>;

    /// Add a characteristic to the last added service
    fn add_characteristic(&mut self, service: &Service, characteristic: &Characteristic) -> Result<(), Self::Error>;
}

/// Every service
pub static ALL: [&Service; 15] = [
    &temperature::SERVICE,
    &accelerometer::SERVICE,
    &light_sensor::SERVICE,
    &gyroscope::SERVICE,
    &magnetometer::SERVICE,
    &button::SERVICE,
    &humidity::SERVICE,
    &barometric_pressure::SERVICE,
    &addressable_pixel::SERVICE,
    &color_sensor::SERVICE,
    &microphone::SERVICE,
    &tone::SERVICE,
    &quaternion::SERVICE,
    &proximity::SERVICE,
    &gesture::SERVICE,
];

/// Find a service by its UUID
pub fn find_service(uuid: Uuid) -> Option<&'static Service> {
    ALL.iter().copied().find(|service| service.uuid == uuid)
}

/// A three axis value
///
/// This is the value of the accelerometer (m/s²), gyroscope (rad/s), and magnetometer (µT)
/// services.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    const SIZE: usize = 12;

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Vector3 { x, y, z }
    }
}

impl TransferFormatTryFrom for Vector3 {
    fn try_from(raw: &[u8]) -> Result<Self, TransferFormatError> {
        if raw.len() != Self::SIZE {
            return Err(TransferFormatError::bad_size("vector", Self::SIZE, raw.len()));
        }

        Ok(Vector3 {
            x: read_at(raw, 0)?,
            y: read_at(raw, 4)?,
            z: read_at(raw, 8)?,
        })
    }
}

impl TransferFormatInto for Vector3 {
    fn len_of_into(&self) -> usize {
        Self::SIZE
    }

    fn build_into_ret(&self, into_ret: &mut [u8]) {
        into_ret[..4].copy_from_slice(&self.x.to_le_bytes());
        into_ret[4..8].copy_from_slice(&self.y.to_le_bytes());
        into_ret[8..].copy_from_slice(&self.z.to_le_bytes());
    }
}

/// Create the value characteristic of a sensor service
///
/// The value of a sensor can only be read or notified.
pub(crate) const fn sensor_value(value_id: u16, format: ValueFormat) -> Characteristic {
    Characteristic::new(
        adafruit_service_uuid(value_id),
        &[Properties::Read, Properties::Notify],
        format,
    )
    .set_write_access(Access::NoAccess)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::characteristic::MEASUREMENT_PERIOD_ID;

    #[test]
    fn service_ids() {
        for (index, service) in ALL.iter().enumerate() {
            let id = ((index as u16) + 1) << 8;

            assert_eq!(adafruit_service_uuid(id), service.uuid, "{}", service.name);
        }
    }

    #[test]
    fn characteristics_are_within_service() {
        for service in ALL.iter() {
            assert!(!service.uuid.can_be_16_bit(), "{}", service.name);

            for characteristic in service.characteristics {
                let base = u128::from(service.uuid) & !(0xFFFF_u128 << 96);
                let char_base = u128::from(characteristic.uuid) & !(0xFFFF_u128 << 96);

                assert_eq!(base, char_base, "{}", service.name);
            }
        }
    }

    #[test]
    fn find() {
        assert_eq!(Some(&gesture::SERVICE), find_service(adafruit_service_uuid(0x0F00)));

        assert_eq!(None, find_service(adafruit_service_uuid(0x1000)));

        let period = temperature::SERVICE
            .find_characteristic(adafruit_service_uuid(MEASUREMENT_PERIOD_ID))
            .unwrap();

        assert!(period.has_property(Properties::Write));

        assert_eq!(None, temperature::SERVICE.find_characteristic(adafruit_service_uuid(0x0201)));
    }

    #[test]
    fn sensor_values_are_read_only() {
        let value = accelerometer::SERVICE.find_characteristic(accelerometer::ACCELERATION).unwrap();

        assert_eq!(Access::NoAccess, value.write_access);

        assert!(value.has_property(Properties::Notify));
    }

    #[test]
    fn vector3_transfer() {
        let vector = Vector3::new(1.0, -2.0, 0.5);

        let raw = TransferFormatInto::into(&vector);

        assert_eq!(
            raw,
            [0x00, 0x00, 0x80, 0x3F, 0x00, 0x00, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x3F]
        );

        assert_eq!(Ok(vector), <Vector3 as TransferFormatTryFrom>::try_from(&raw));

        assert!(<Vector3 as TransferFormatTryFrom>::try_from(&raw[..8]).is_err());
    }

    #[derive(Default)]
    struct Recorder {
        attributes: Vec<Uuid>,
        fail_at: Option<usize>,
    }

    impl ServiceBinder for Recorder {
        type Error = usize;

        fn add_service(&mut self, service: &Service) -> Result<(), usize> {
            self.attributes.push(service.uuid);
            Ok(())
        }

        fn add_characteristic(&mut self, _: &Service, c: &Characteristic) -> Result<(), usize> {
            if Some(self.attributes.len()) == self.fail_at {
                return Err(self.attributes.len());
            }

            self.attributes.push(c.uuid);
            Ok(())
        }
    }

    #[test]
    fn bind_order() {
        let mut recorder = Recorder::default();

        addressable_pixel::SERVICE.bind(&mut recorder).unwrap();

        assert_eq!(
            recorder.attributes,
            [
                adafruit_service_uuid(0x0900),
                adafruit_service_uuid(0x0901),
                adafruit_service_uuid(0x0902),
                adafruit_service_uuid(0x0903),
            ]
        );
    }

    #[test]
    fn bind_stops_on_error() {
        let mut recorder = Recorder {
            fail_at: Some(2),
            ..Default::default()
        };

        assert_eq!(Err(2), microphone::SERVICE.bind(&mut recorder));

        assert_eq!(2, recorder.attributes.len());
    }
}
