pub mod capture_buffer;
pub mod convert;
pub mod editor;
pub mod wav_format;
