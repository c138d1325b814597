use bo_tie_adafruit::characteristic::{Access, Characteristic, InitialValue, Properties};
use bo_tie_adafruit::services::{self, Service, ServiceBinder};
use bo_tie_adafruit::{adafruit_service_uuid, Uuid};
use quickcheck_macros::quickcheck;
use std::collections::HashSet;

#[quickcheck]
fn uuid_is_injective(a: u16, b: u16) -> bool {
    (a == b) == (adafruit_service_uuid(a) == adafruit_service_uuid(b))
}

#[quickcheck]
fn uuid_fills_template(n: u16) -> bool {
    let uuid = adafruit_service_uuid(n).to_string();

    uuid == format!("ADAF{:04X}-C332-42A8-93BD-25E905756CB8", n) && Uuid::try_from(uuid.as_str()).is_ok()
}

/// An attribute table in the order a GATT server would create it
#[derive(Default)]
struct AttributeTable {
    handles: Vec<(Uuid, u8)>,
    uuids: HashSet<Uuid>,
}

impl ServiceBinder for AttributeTable {
    type Error = Uuid;

    fn add_service(&mut self, service: &Service) -> Result<(), Uuid> {
        self.uuids.clear();
        self.handles.push((service.uuid, 0));
        Ok(())
    }

    fn add_characteristic(&mut self, _: &Service, characteristic: &Characteristic) -> Result<(), Uuid> {
        // a characteristic UUID can only be used once within a service
        if !self.uuids.insert(characteristic.uuid) {
            return Err(characteristic.uuid);
        }

        self.handles.push((characteristic.uuid, characteristic.properties_bit_field()));
        Ok(())
    }
}

#[test]
fn bind_every_service() {
    let mut table = AttributeTable::default();

    for service in services::ALL.iter() {
        service.bind(&mut table).unwrap();
    }

    let characteristics: usize = services::ALL.iter().map(|s| s.characteristics.len()).sum();

    assert_eq!(services::ALL.len() + characteristics, table.handles.len());
}

#[test]
fn measurement_periods() {
    let period_uuid = adafruit_service_uuid(0x0001);

    for service in services::ALL.iter() {
        if let Some(period) = service.find_characteristic(period_uuid) {
            assert!(period.is_readable() && period.is_writable(), "{}", service.name);

            let expected = match service.name {
                "gesture" | "button" => 0,
                _ => 1000,
            };

            assert_eq!(Some(InitialValue::Int32(expected)), period.initial_value, "{}", service.name);
        }
    }

    assert!(services::tone::SERVICE.find_characteristic(period_uuid).is_none());

    assert!(services::addressable_pixel::SERVICE
        .find_characteristic(period_uuid)
        .is_none());
}

#[test]
fn no_access_is_never_open() {
    for service in services::ALL.iter() {
        for c in service.characteristics {
            if c.write_access == Access::NoAccess {
                assert!(!c.is_writable(), "{} {}", service.name, c.uuid);
            }

            if c.has_property(Properties::Notify) {
                assert_eq!(Access::Open, c.read_access, "{} {}", service.name, c.uuid);
            }
        }
    }
}
