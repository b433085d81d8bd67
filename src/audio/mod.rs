//! WAV container assembly and repair.

mod repair;
mod wav;

pub use repair::{find_wav_files, repair_wav_file, RepairOutcome};
pub use wav::{
    encode_wav, is_valid_wav, pcm_duration_seconds, wav_header, BITS_PER_SAMPLE, CHANNELS,
    MAX_DATA_LEN, SAMPLE_RATE, WAV_HEADER_LEN, WAV_MIME,
};
