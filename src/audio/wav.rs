//! Canonical PCM WAV framing.
//!
//! The TTS model returns headerless 16-bit mono PCM at 24 kHz; these helpers
//! wrap such payloads in a 44-byte RIFF/WAVE header.

use crate::error::{PodgenError, Result};

/// Size of the canonical PCM WAV header.
pub const WAV_HEADER_LEN: usize = 44;
/// Sample rate of synthesized speech.
pub const SAMPLE_RATE: u32 = 24_000;
/// Mono.
pub const CHANNELS: u16 = 1;
pub const BITS_PER_SAMPLE: u16 = 16;
/// MIME type recorded for generated files.
pub const WAV_MIME: &str = "audio/wav";

const BLOCK_ALIGN: u16 = CHANNELS * (BITS_PER_SAMPLE / 8);
const BYTE_RATE: u32 = SAMPLE_RATE * BLOCK_ALIGN as u32;

/// Largest payload whose RIFF chunk size (36 + len) still fits in 32 bits.
pub const MAX_DATA_LEN: u64 = u32::MAX as u64 - 36;

/// Build the 44-byte header for `data_len` bytes of 16-bit mono 24 kHz PCM.
pub fn wav_header(data_len: u64) -> Result<[u8; WAV_HEADER_LEN]> {
    if data_len > MAX_DATA_LEN {
        return Err(PodgenError::WavOverflow(data_len));
    }
    let data_len = data_len as u32;

    let mut header = [0u8; WAV_HEADER_LEN];

    // RIFF chunk descriptor
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&(36 + data_len).to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt subchunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM
    header[22..24].copy_from_slice(&CHANNELS.to_le_bytes());
    header[24..28].copy_from_slice(&SAMPLE_RATE.to_le_bytes());
    header[28..32].copy_from_slice(&BYTE_RATE.to_le_bytes());
    header[32..34].copy_from_slice(&BLOCK_ALIGN.to_le_bytes());
    header[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data subchunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_len.to_le_bytes());

    Ok(header)
}

/// Frame raw PCM as a complete WAV file.
pub fn encode_wav(pcm: &[u8]) -> Result<Vec<u8>> {
    let header = wav_header(pcm.len() as u64)?;
    let mut out = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    out.extend_from_slice(&header);
    out.extend_from_slice(pcm);
    Ok(out)
}

/// Check for the RIFF/WAVE magic at the start of a buffer.
pub fn is_valid_wav(bytes: &[u8]) -> bool {
    bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE"
}

/// Playback duration of a PCM payload in seconds.
pub fn pcm_duration_seconds(pcm_len: usize) -> f64 {
    pcm_len as f64 / BYTE_RATE as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn test_header_fields() {
        for len in [0u64, 1, 2, 96_000, 1 << 20, MAX_DATA_LEN] {
            let header = wav_header(len).unwrap();
            assert_eq!(header.len(), 44);
            assert_eq!(&header[0..4], b"RIFF");
            assert_eq!(&header[8..12], b"WAVE");
            assert_eq!(&header[12..16], b"fmt ");
            assert_eq!(&header[36..40], b"data");
            assert_eq!(u32_at(&header, 4) as u64, 36 + len);
            assert_eq!(u32_at(&header, 40) as u64, len);
        }
    }

    #[test]
    fn test_format_constants() {
        let header = wav_header(0).unwrap();
        assert_eq!(u32_at(&header, 16), 16);
        assert_eq!(u16_at(&header, 20), 1);
        assert_eq!(u16_at(&header, 22), 1);
        assert_eq!(u32_at(&header, 24), 24_000);
        assert_eq!(u32_at(&header, 28), 48_000);
        assert_eq!(u16_at(&header, 32), 2);
        assert_eq!(u16_at(&header, 34), 16);
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(matches!(
            wav_header(MAX_DATA_LEN + 1),
            Err(PodgenError::WavOverflow(_))
        ));
        assert!(wav_header(u64::MAX).is_err());
    }

    #[test]
    fn test_encode_wav() {
        let pcm = vec![7u8; 480];
        let wav = encode_wav(&pcm).unwrap();
        assert_eq!(wav.len(), 44 + 480);
        assert!(is_valid_wav(&wav));
        assert_eq!(&wav[44..], &pcm[..]);
    }

    #[test]
    fn test_is_valid_wav_rejects_raw_pcm() {
        assert!(!is_valid_wav(&[0u8; 100]));
        assert!(!is_valid_wav(b"RIFF"));
    }

    #[test]
    fn test_pcm_duration() {
        assert_eq!(pcm_duration_seconds(96_000), 2.0);
    }
}
