use super::{bookmarks, report};
use crate::{bookmark::Bookmark, error::Result, handle::Handle};

pub fn bookmark_get(handle: u64) -> Result<Bookmark> {
    let handle = Handle::from_raw(handle)?;
    let bookmark = *bookmarks().get(handle)?;
    Ok(bookmark)
}

pub fn bookmark_destroy(handle: u64) -> Result<()> {
    let raw = handle;
    let handle = Handle::from_raw(handle)?;
    bookmarks().remove(handle)?;
    log::trace!("Destroy bookmark: {:#x}", raw);
    Ok(())
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Bookmark_destroy(bookmark: u64) -> bool {
    report("Bookmark_destroy", bookmark_destroy(bookmark)).is_some()
}
