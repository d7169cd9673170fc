//! Board information.
//!
//! Each board carries a small cbor-encoded record at a fixed flash page:
//! its name, the USB serial string to report, and which side it is for
//! designs where that matters.  The record is framed with a trailing CRC so
//! a half-written or worn page reads as absent rather than as garbage
//! identity data.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use crc::{Crc, CRC_16_IBM_SDLC};
use minicbor::{Decode, Encode};

use core::slice::from_raw_parts;

use crate::config::SERIAL_NUMBER;
use crate::keys::Side;
use crate::log::warn;

const CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_SDLC);

/// Size of the reserved flash page.
pub const INFO_PAGE_SIZE: usize = 256;

impl<C> Encode<C> for Side {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.u8(if self.is_left() { 0 } else { 1 })?;
        Ok(())
    }
}

impl<'b, C> Decode<'b, C> for Side {
    fn decode(
        d: &mut minicbor::Decoder<'b>,
        _ctx: &mut C,
    ) -> Result<Self, minicbor::decode::Error> {
        match d.u8()? {
            0 => Ok(Side::Left),
            1 => Ok(Side::Right),
            _ => Err(minicbor::decode::Error::message("invalid side")),
        }
    }
}

/// Unchanging information about a particular board.
#[derive(Debug, PartialEq, Encode, Decode)]
#[cbor(map)]
pub struct BoardInfo {
    /// The name of this board.
    #[n(1)]
    pub name: String,

    /// Serial string to report on USB, when this board overrides the
    /// family-wide default.
    #[n(2)]
    pub serial: Option<String>,

    /// Which side this board occupies.  `None` for non-split designs (the
    /// trackball) or where one MCU drives both halves.
    #[n(3)]
    pub side: Option<Side>,
}

impl BoardInfo {
    /// The serial string to hand the USB stack.
    pub fn usb_serial(&self) -> &str {
        self.serial.as_deref().unwrap_or(SERIAL_NUMBER)
    }

    /// Encode into a page image: cbor record followed by its CRC.  Returns
    /// `None` if the record somehow doesn't fit the page.
    pub fn to_page(&self) -> Option<Vec<u8>> {
        let mut buffer = Vec::new();
        if minicbor::encode(self, &mut buffer).is_err() {
            return None;
        }
        if buffer.len() + 2 > INFO_PAGE_SIZE {
            warn!("board info record too large for page");
            return None;
        }
        let crc = CRC.checksum(&buffer);
        buffer.extend_from_slice(&crc.to_le_bytes());
        Some(buffer)
    }

    /// Decode a page image, checking the CRC frame.
    pub fn from_page(page: &[u8]) -> Option<BoardInfo> {
        let mut decoder = minicbor::Decoder::new(page);
        let info: BoardInfo = match decoder.decode() {
            Ok(info) => info,
            Err(_) => {
                warn!("unreadable board info page");
                return None;
            }
        };
        let body = decoder.position();
        let rest = page.get(body..body + 2)?;
        let stored = u16::from_le_bytes([rest[0], rest[1]]);
        if stored != CRC.checksum(&page[..body]) {
            warn!("board info page fails checksum");
            return None;
        }
        Some(info)
    }

    /// Attempt to decode the board information from its fixed address in
    /// memory.  Assumes a readable block of [`INFO_PAGE_SIZE`] bytes there.
    ///
    /// # Safety
    ///
    /// `addr` must point at `INFO_PAGE_SIZE` bytes of mapped flash.
    pub unsafe fn decode_from_memory(addr: *const u8) -> Option<BoardInfo> {
        let page: &[u8] = from_raw_parts(addr, INFO_PAGE_SIZE);
        Self::from_page(page)
    }
}

#[cfg(test)]
mod test {
    use super::BoardInfo;
    use crate::keys::Side;
    use alloc::string::String;

    #[test]
    fn page_framing() {
        let info = BoardInfo {
            name: String::from("voyager"),
            serial: None,
            side: Some(Side::Left),
        };
        let page = info.to_page().expect("encodes");
        assert_eq!(BoardInfo::from_page(&page), Some(info));
        assert_eq!(
            BoardInfo::from_page(&page)
                .map(|i| String::from(i.usb_serial())),
            Some(String::from(crate::config::SERIAL_NUMBER))
        );

        // Flip a byte: the page must read as absent.
        let mut bad = page.clone();
        bad[1] ^= 0x40;
        assert_eq!(BoardInfo::from_page(&bad), None);
    }
}
