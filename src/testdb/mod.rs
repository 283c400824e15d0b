//! Test database module
//!
//! Provides the in-memory mock camera used by the unit tests and by the CLI
//! when no hardware binding is linked in. The mock implements the same
//! [`CameraDriver`](crate::device::traits::CameraDriver) contract as a real
//! binding, so everything above the driver boundary can be exercised
//! without a connected device.

pub mod mock_device;

pub use mock_device::MockCamera;
