//! USB-HID transport: one 64-byte report per packet, in and out.

use thiserror::Error;

/// Number of bytes in one HID report, excluding the report-id prefix a
/// write prepends.
pub const PACKET_SIZE: usize = 64;

/// Errors opening or driving the HID transport.
#[derive(Debug, Error)]
pub enum TransportError {
	/// Failed to open the underlying HID device.
	#[error(transparent)]
	Open(#[from] hidapi::HidError),

	/// A write to the device failed.
	#[error("HID write failed: {0}")]
	Write(hidapi::HidError),

	/// A read did not complete before the configured timeout.
	#[error("HID read timed out")]
	Timeout,

	/// No device matching vendor/product id and product string was found.
	#[error("no DLPC900 device found (vendor=0x{vendor_id:04X}, product=0x{product_id:04X})")]
	DeviceNotFound {
		/// USB vendor id searched for.
		vendor_id: u16,
		/// USB product id searched for.
		product_id: u16,
	},

	/// `dmd_index` selected a device beyond the number enumerated.
	#[error("dmd_index {requested} requested but only {available} device(s) found")]
	AmbiguousDeviceIndex {
		/// Index the caller requested.
		requested: usize,
		/// Number of matching devices actually enumerated.
		available: usize,
	},
}

/// A 64-byte-packet transport the command framer drives.
///
/// Tests substitute a fake implementation (an in-memory queue of expected
/// request/reply packets) so protocol logic never has to touch a real
/// device; see `mock.rs`.
pub trait Transport {
	/// Writes one 64-byte packet. Implementations own any report-id prefix
	/// the underlying device requires.
	fn write_packet(&mut self, packet: &[u8; PACKET_SIZE]) -> Result<(), TransportError>;

	/// Reads one 64-byte packet, waiting up to `timeout_ms`. Returns `None`
	/// on timeout rather than erroring — the caller (the framer) decides
	/// whether a timeout is fatal.
	fn read_packet(&mut self, timeout_ms: u32) -> Result<Option<[u8; PACKET_SIZE]>, TransportError>;
}

/// Default USB vendor id for TI DLPC900 controllers.
pub const DEFAULT_VENDOR_ID: u16 = 0x0451;
/// Default USB product id for TI DLPC900 controllers.
pub const DEFAULT_PRODUCT_ID: u16 = 0xC900;
/// The `product_string` DLPC900 devices report, used to filter enumeration
/// results down to the controller and away from any other device sharing
/// the vendor/product id.
pub const PRODUCT_STRING: &str = "DLPC900";

/// A [`Transport`] backed by a real `hidapi` device handle.
pub struct HidTransport {
	device: hidapi::HidDevice,
}

impl HidTransport {
	/// Opens the `dmd_index`-th enumerated device whose product string is
	/// `"DLPC900"`.
	///
	/// # Errors
	///
	/// Returns [`TransportError::DeviceNotFound`] if none match, or
	/// [`TransportError::AmbiguousDeviceIndex`] if `dmd_index` is out of
	/// range of the devices found.
	pub fn open_by_index(
		api: &hidapi::HidApi,
		vendor_id: u16,
		product_id: u16,
		dmd_index: usize,
	) -> Result<Self, TransportError> {
		let candidates: Vec<_> = api
			.device_list()
			.filter(|info| {
				info.vendor_id() == vendor_id
					&& info.product_id() == product_id
					&& info.product_string() == Some(PRODUCT_STRING)
			})
			.collect();

		if candidates.is_empty() {
			return Err(TransportError::DeviceNotFound { vendor_id, product_id });
		}
		let Some(info) = candidates.get(dmd_index) else {
			return Err(TransportError::AmbiguousDeviceIndex {
				requested: dmd_index,
				available: candidates.len(),
			});
		};

		let device = info.open_device(api)?;
		Ok(Self { device })
	}

	/// Opens a device by its OS-specific path, as saved in a persisted
	/// [`dlpc900_types::config::Config`]'s `hid_path`.
	pub fn open_by_path(api: &hidapi::HidApi, path: &std::ffi::CStr) -> Result<Self, TransportError> {
		let device = api.open_path(path)?;
		Ok(Self { device })
	}
}

impl Transport for HidTransport {
	fn write_packet(&mut self, packet: &[u8; PACKET_SIZE]) -> Result<(), TransportError> {
		let mut report = Vec::with_capacity(PACKET_SIZE + 1);
		report.push(0x00);
		report.extend_from_slice(packet);
		self.device.write(&report).map_err(TransportError::Write)?;
		Ok(())
	}

	fn read_packet(&mut self, timeout_ms: u32) -> Result<Option<[u8; PACKET_SIZE]>, TransportError> {
		let mut buf = [0u8; PACKET_SIZE];
		let read = self.device.read_timeout(&mut buf, timeout_ms as i32).map_err(TransportError::Write)?;
		if read == 0 {
			Ok(None)
		} else {
			Ok(Some(buf))
		}
	}
}

#[cfg(test)]
pub(crate) mod mock {
	use std::collections::VecDeque;

	use super::{Transport, TransportError, PACKET_SIZE};

	/// An in-memory [`Transport`] double: a queue of packets to return on
	/// read, and a record of every packet written, for orchestrator and
	/// controller tests.
	#[derive(Default)]
	pub struct MockTransport {
		pub written: Vec<[u8; PACKET_SIZE]>,
		pub replies: VecDeque<[u8; PACKET_SIZE]>,
		/// `timeout_ms` passed to the most recent `read_packet` call, for
		/// tests asserting the framer forwards its configured timeout.
		pub last_read_timeout_ms: Option<u32>,
	}

	impl MockTransport {
		pub fn new() -> Self {
			Self::default()
		}

		pub fn push_reply(&mut self, packet: [u8; PACKET_SIZE]) {
			self.replies.push_back(packet);
		}
	}

	impl Transport for MockTransport {
		fn write_packet(&mut self, packet: &[u8; PACKET_SIZE]) -> Result<(), TransportError> {
			self.written.push(*packet);
			Ok(())
		}

		fn read_packet(&mut self, timeout_ms: u32) -> Result<Option<[u8; PACKET_SIZE]>, TransportError> {
			self.last_read_timeout_ms = Some(timeout_ms);
			Ok(self.replies.pop_front())
		}
	}
}
