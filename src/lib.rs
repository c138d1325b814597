//! Adafruit Bluefruit Playground services
//!
//! The Bluefruit Playground protocol is a set of vendor GATT services (temperature, accelerometer,
//! addressable pixels, and so on) along with a manufacturer specific advertising block used for
//! identifying a compatible peripheral while scanning. This library contains the wire formats and
//! the schema tables of those services. It does not contain a Bluetooth stack; the tables are
//! bound to a GATT server through [`ServiceBinder`](services::ServiceBinder) and the advertising
//! data is handed to whatever is driving the radio.
//!
//! ```
//! use bo_tie_adafruit::advertisement;
//! use bo_tie_adafruit::pixel::PixelPacket;
//!
//! let block = advertisement::encode(advertisement::product_id::CPB_CIRCUIT_PYTHON);
//!
//! assert_eq!(Some(0x8046), advertisement::matches(&block));
//!
//! let raw = PixelPacket::encode(0, true, &[0xFF, 0, 0]).unwrap();
//!
//! assert_eq!(raw, [0, 0, 1, 0xFF, 0, 0]);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod advertisement;
pub mod assigned;
pub mod characteristic;
pub mod pixel;
pub mod services;
pub mod transfer;
pub mod uuid;

pub use crate::uuid::{adafruit_service_uuid, Uuid};
