//! Command framer: builds and parses the flag-byte/sequence/length/opcode
//! header, and chunks/reassembles payloads across 64-byte packets.

use log::{debug, trace};

use crate::error::DmdError;
use crate::transport::{Transport, TransportError, PACKET_SIZE};

/// First packet's fixed header size (flag, sequence, length, opcode).
const HEADER_SIZE: usize = 6;
/// Payload bytes the first packet can carry after its header.
const FIRST_PACKET_PAYLOAD: usize = PACKET_SIZE - HEADER_SIZE;
/// Payload bytes a continuation packet carries after its marker byte.
const CONT_PACKET_PAYLOAD: usize = PACKET_SIZE - 1;

const FLAG_READ: u8 = 1 << 7;
const FLAG_REPLY: u8 = 1 << 6;
const FLAG_ERROR: u8 = 1 << 5;

/// Read or write transaction, set in the flag byte's bit 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RwMode {
	/// Bit 7 clear.
	Write,
	/// Bit 7 set.
	Read,
}

/// A reassembled, flag-parsed device reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedReply {
	/// The device's error flag (bit 5 of the flag byte).
	pub error: bool,
	/// Echoed sequence byte.
	pub sequence: u8,
	/// Reply payload (opcode bytes are not included; the framer's `send`
	/// caller already knows the opcode it asked for).
	pub data: Vec<u8>,
}

/// Drives a [`Transport`] with the DLPC900 packet framing: header
/// construction, payload chunking, and reply reassembly.
pub struct Framer<T: Transport> {
	transport: T,
	sequence: u8,
	timeout_ms: u32,
}

impl<T: Transport> Framer<T> {
	/// Wraps a transport, starting the sequence counter at 0 and using
	/// [`DEFAULT_TIMEOUT_MS`] for reply reads.
	pub fn new(transport: T) -> Self {
		Self::with_timeout_ms(transport, DEFAULT_TIMEOUT_MS)
	}

	/// As [`Self::new`], but reads wait up to `timeout_ms` instead of the
	/// default, for callers that loaded a [`crate::settings::Settings`]
	/// with a different `hid_read_timeout_ms`.
	pub fn with_timeout_ms(transport: T, timeout_ms: u32) -> Self {
		Self { transport, sequence: 0, timeout_ms }
	}

	/// Changes the reply read timeout used by subsequent [`Self::send`]
	/// calls.
	pub fn set_timeout_ms(&mut self, timeout_ms: u32) {
		self.timeout_ms = timeout_ms;
	}

	fn next_sequence(&mut self) -> u8 {
		let seq = self.sequence;
		self.sequence = self.sequence.wrapping_add(1);
		seq
	}

	/// Sends one command, chunking `payload` across as many packets as
	/// needed, and reads back a reassembled reply if `reply_requested`.
	///
	/// # Errors
	///
	/// Returns [`DmdError::Transport`] on a write failure, or if a reply
	/// was requested but a read timed out before it arrived
	/// ([`TransportError::Timeout`]); returns [`DmdError::BadPayload`] if
	/// a reply arrived but was too short to contain a header.
	pub fn send(
		&mut self,
		rw_mode: RwMode,
		reply_requested: bool,
		opcode: u16,
		payload: &[u8],
	) -> Result<Vec<u8>, DmdError> {
		self.send_with_sequence(rw_mode, reply_requested, opcode, payload, None)
	}

	/// As [`Self::send`], but lets the caller pin the sequence byte instead
	/// of taking the next auto-incremented one. `start_stop_sequence` needs
	/// this: its sequence byte doubles as a sub-command selector.
	pub fn send_with_sequence(
		&mut self,
		rw_mode: RwMode,
		reply_requested: bool,
		opcode: u16,
		payload: &[u8],
		sequence_override: Option<u8>,
	) -> Result<Vec<u8>, DmdError> {
		let sequence = sequence_override.unwrap_or_else(|| self.next_sequence());
		let mut flag = 0u8;
		if rw_mode == RwMode::Read {
			flag |= FLAG_READ;
		}
		if reply_requested {
			flag |= FLAG_REPLY;
		}

		let len_payload = (payload.len() + 2) as u16;
		let mut buffer = Vec::with_capacity(HEADER_SIZE + payload.len());
		buffer.push(flag);
		buffer.push(sequence);
		buffer.extend(len_payload.to_le_bytes());
		buffer.extend(opcode.to_le_bytes());
		buffer.extend_from_slice(payload);

		debug!(
			"send opcode=0x{opcode:04X} rw={rw_mode:?} reply={reply_requested} seq=0x{sequence:02X} payload_len={}",
			payload.len()
		);

		self.write_chunked(&buffer)?;

		if !reply_requested {
			return Ok(Vec::new());
		}

		let raw = self.read_reply()?;
		let decoded = decode_response(&raw)?;
		if decoded.error {
			debug!("device flagged error on reply to opcode=0x{opcode:04X}");
		}
		trace!("decoded reply: {decoded:?}");
		Ok(decoded.data)
	}

	fn write_chunked(&mut self, buffer: &[u8]) -> Result<(), DmdError> {
		let mut packet = [0u8; PACKET_SIZE];
		packet[..HEADER_SIZE.min(buffer.len())].copy_from_slice(&buffer[..HEADER_SIZE.min(buffer.len())]);

		let first_len = FIRST_PACKET_PAYLOAD.min(buffer.len().saturating_sub(HEADER_SIZE));
		packet[HEADER_SIZE..HEADER_SIZE + first_len]
			.copy_from_slice(&buffer[HEADER_SIZE..HEADER_SIZE + first_len]);
		self.transport.write_packet(&packet)?;

		let mut offset = HEADER_SIZE + first_len;
		while offset < buffer.len() {
			let chunk_len = CONT_PACKET_PAYLOAD.min(buffer.len() - offset);
			let mut cont = [0u8; PACKET_SIZE];
			cont[1..1 + chunk_len].copy_from_slice(&buffer[offset..offset + chunk_len]);
			self.transport.write_packet(&cont)?;
			offset += chunk_len;
		}

		Ok(())
	}

	fn read_reply(&mut self) -> Result<Vec<u8>, DmdError> {
		let Some(first) = self.transport.read_packet(self.timeout_ms)? else {
			return Err(TransportError::Timeout.into());
		};

		let declared_len = u16::from_le_bytes([first[2], first[3]]) as usize;
		let mut data = Vec::with_capacity(declared_len);
		data.extend_from_slice(&first);

		let mut have = FIRST_PACKET_PAYLOAD;
		while have < declared_len.saturating_sub(2) {
			let Some(cont) = self.transport.read_packet(self.timeout_ms)? else {
				return Err(TransportError::Timeout.into());
			};
			data.extend_from_slice(&cont[1..]);
			have += CONT_PACKET_PAYLOAD;
		}

		Ok(data)
	}
}

/// Default HID read timeout.
pub const DEFAULT_TIMEOUT_MS: u32 = 5_000;

/// Parses a reassembled reply buffer's flag byte and length-delimited data.
///
/// # Errors
///
/// Returns [`DmdError::BadPayload`] if the buffer is too short to contain
/// a header.
pub fn decode_response(buffer: &[u8]) -> Result<DecodedReply, DmdError> {
	if buffer.len() < 4 {
		return Err(DmdError::BadPayload);
	}

	let flag = buffer[0];
	let sequence = buffer[1];
	let data_len = u16::from_le_bytes([buffer[2], buffer[3]]) as usize;
	let data_start = 4;
	let data_end = (data_start + data_len).min(buffer.len());
	let data = buffer[data_start..data_end].to_vec();

	Ok(DecodedReply {
		error: flag & FLAG_ERROR != 0,
		sequence,
		data,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transport::mock::MockTransport;

	#[test]
	fn send_without_reply_writes_single_packet() {
		let mut framer = Framer::new(MockTransport::new());
		framer.send(RwMode::Write, false, 0x1A1B, &[0x03]).unwrap();
		assert_eq!(framer.transport.written.len(), 1);
		let packet = framer.transport.written[0];
		assert_eq!(packet[0], 0); // write, no reply
		assert_eq!(u16::from_le_bytes([packet[2], packet[3]]), 3); // opcode(2) + payload(1)
		assert_eq!(u16::from_le_bytes([packet[4], packet[5]]), 0x1A1B);
		assert_eq!(packet[6], 0x03);
	}

	#[test]
	fn send_with_reply_decodes_response() {
		let mut framer = Framer::new(MockTransport::new());
		let mut reply = [0u8; PACKET_SIZE];
		reply[2..4].copy_from_slice(&3u16.to_le_bytes());
		reply[4] = 0x07;
		framer.transport.push_reply(reply);

		let data = framer.send(RwMode::Read, true, 0x0100, &[]).unwrap();
		assert_eq!(data, vec![0x07]);
	}

	#[test]
	fn reply_with_error_flag_is_reported() {
		let mut reply = [0u8; PACKET_SIZE];
		reply[0] = FLAG_ERROR;
		reply[2..4].copy_from_slice(&2u16.to_le_bytes());

		let decoded = decode_response(&reply).unwrap();
		assert!(decoded.error);
	}

	#[test]
	fn long_payload_spills_into_continuation_packets() {
		let mut framer = Framer::new(MockTransport::new());
		let payload = vec![0xAAu8; 120];
		framer.send(RwMode::Write, false, 0x1A2B, &payload).unwrap();
		// buffer = 6-byte header + 120 = 126 bytes; first packet carries
		// 58, leaving 62 for a single continuation packet (capacity 63).
		assert_eq!(framer.transport.written.len(), 2);
	}

	#[test]
	fn payload_needing_two_continuation_packets() {
		let mut framer = Framer::new(MockTransport::new());
		let payload = vec![0xAAu8; 122];
		framer.send(RwMode::Write, false, 0x1A2B, &payload).unwrap();
		// buffer = 6 + 122 = 128; first packet carries 58, leaving 70 for
		// continuation packets of capacity 63 each -> 2 continuations.
		assert_eq!(framer.transport.written.len(), 3);
	}

	#[test]
	fn reply_read_timeout_surfaces_as_transport_timeout() {
		let mut framer = Framer::new(MockTransport::new());
		let err = framer.send(RwMode::Read, true, 0x0100, &[]).unwrap_err();
		assert!(matches!(err, DmdError::Transport(TransportError::Timeout)));
	}

	#[test]
	fn custom_timeout_is_passed_to_the_transport() {
		let mut framer = Framer::with_timeout_ms(MockTransport::new(), 250);
		framer.send(RwMode::Write, false, 0x1A1B, &[0x03]).unwrap();
		assert_eq!(framer.transport.last_read_timeout_ms, None);

		framer.set_timeout_ms(750);
		let _ = framer.send(RwMode::Read, true, 0x0100, &[]);
		assert_eq!(framer.transport.last_read_timeout_ms, Some(750));
	}
}
