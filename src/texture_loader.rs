use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use carousel::gallery::{extension_of, quarter_turns, read_orientation};
use raylib::prelude::*;

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("failed to read {:?}", image_path))?;

    let extension = extension_of(image_path);
    let orientation = read_orientation(&file_bytes, &extension);

    // Extension hint is needed when decoding from memory
    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| anyhow!("failed to decode {:?}: {}", image_path, e))?;

    for _ in 0..quarter_turns(orientation) {
        image.rotate_cw();
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("failed to create texture for {:?}: {}", image_path, e))?;

    // CPU-side copy is no longer needed once uploaded
    drop(image);

    Ok(texture)
}
