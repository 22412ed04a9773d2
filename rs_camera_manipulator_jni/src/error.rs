#[derive(Debug)]
pub enum Error {
    Manipulator(rs_camera_manipulator::error::Error),
    Jni(jni::errors::Error),
    ArrayTooShort(usize, usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Manipulator(err) => write!(f, "{}", err),
            Error::Jni(err) => write!(f, "{}", err),
            Error::ArrayTooShort(expected, actual) => write!(
                f,
                "Array too short, expected at least {} elements, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for Error {}

impl From<rs_camera_manipulator::error::Error> for Error {
    fn from(value: rs_camera_manipulator::error::Error) -> Self {
        Error::Manipulator(value)
    }
}

impl From<jni::errors::Error> for Error {
    fn from(value: jni::errors::Error) -> Self {
        Error::Jni(value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn test_display() {
        let err: Error = rs_camera_manipulator::error::Error::StaleHandle(0x1_0100_0000).into();
        assert_eq!(err.to_string(), "Stale handle: 0x101000000, already destroyed");
        assert_eq!(
            Error::ArrayTooShort(3, 1).to_string(),
            "Array too short, expected at least 3 elements, got 1"
        );
    }
}
