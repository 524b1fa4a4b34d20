pub mod open_meteo;
pub mod types;
pub mod utils;

pub use open_meteo::OpenMeteoReader;
pub use types::{FileType, ReadError, WeatherReader, WeatherRecord};
pub use utils::reader_from_filetype;

use std::path::Path;

pub fn create_reader(path: &Path) -> Result<Box<dyn WeatherReader>, ReadError> {
    match reader_from_filetype(path)? {
        FileType::OpenMeteoJson => Ok(Box::new(OpenMeteoReader::new(path))),
    }
}
