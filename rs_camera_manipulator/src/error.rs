#[derive(Debug)]
pub enum Error {
    NullHandle,
    InvalidHandle(u64),
    StaleHandle(u64),
    RegistryFull,
    InvalidMode(i32),
    InvalidKey(i32),
    InvalidFov(i32),
    NullString,
    Utf8(std::str::Utf8Error),
    Json(serde_json::Error),
    IO(std::io::Error, Option<String>),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NullHandle => f.write_str("Null handle"),
            Error::InvalidHandle(handle) => write!(f, "Invalid handle: {:#x}", handle),
            Error::StaleHandle(handle) => {
                write!(f, "Stale handle: {:#x}, already destroyed", handle)
            }
            Error::RegistryFull => f.write_str("Handle registry is full"),
            Error::InvalidMode(mode) => write!(f, "Invalid manipulator mode: {}", mode),
            Error::InvalidKey(key) => write!(f, "Invalid key: {}", key),
            Error::InvalidFov(fov) => write!(f, "Invalid fov direction: {}", fov),
            Error::NullString => f.write_str("Null string"),
            Error::Utf8(err) => write!(f, "{}", err),
            Error::Json(err) => write!(f, "{}", err),
            Error::IO(err, msg) => match msg {
                Some(msg) => write!(f, "{}, {}", err, msg),
                None => write!(f, "{}", err),
            },
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
