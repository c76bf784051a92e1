//! Visual randomness example.
//!
//! Hashes a coordinate grid with ASCON-HASH and ASCON-HASHA and writes
//! each as a BMP so the avalanche behavior of the two round schedules
//! can be eyeballed side by side.
//!
//! Generates:
//! - `ascon_randomness_hash.bmp`
//! - `ascon_randomness_hasha.bmp`

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> std::io::Result<()> {
    let width = 1024;
    let height = 1024;

    println!("Generating ASCON-HASH randomness map...");
    generate_image("ascon_randomness_hash.bmp", width, height, |x, y| {
        let mut buf = [0u8; 16];
        buf[0..8].copy_from_slice(&u64::from(x).to_le_bytes());
        buf[8..16].copy_from_slice(&u64::from(y).to_le_bytes());
        ascon_suite::xof::hash(&buf)
    })?;

    println!("Generating ASCON-HASHA randomness map...");
    generate_image("ascon_randomness_hasha.bmp", width, height, |x, y| {
        let mut buf = [0u8; 16];
        buf[0..8].copy_from_slice(&u64::from(x).to_le_bytes());
        buf[8..16].copy_from_slice(&u64::from(y).to_le_bytes());
        ascon_suite::xof::hasha(&buf)
    })?;

    println!("Done. Generated two images.");
    Ok(())
}

fn generate_image<F>(filename: &str, width: u32, height: u32, hasher: F) -> std::io::Result<()>
where
    F: Fn(u32, u32) -> [u8; 32],
{
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    let file_size = 54 + (width * height * 3);
    let reserved = 0u32;
    let offset = 54u32;
    let header_size = 40u32;
    let planes = 1u16;
    let bpp = 24u16;
    let compression = 0u32;
    let image_size = width * height * 3;
    let x_ppm = 0i32;
    let y_ppm = 0i32;
    let colors_used = 0u32;
    let colors_important = 0u32;

    writer.write_all(b"BM")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(&reserved.to_le_bytes())?;
    writer.write_all(&offset.to_le_bytes())?;

    writer.write_all(&header_size.to_le_bytes())?;
    writer.write_all(&(width as i32).to_le_bytes())?;
    // negative height for a top-down image, matching our row-major loop below
    writer.write_all(&(-(height as i32)).to_le_bytes())?;
    writer.write_all(&planes.to_le_bytes())?;
    writer.write_all(&bpp.to_le_bytes())?;
    writer.write_all(&compression.to_le_bytes())?;
    writer.write_all(&image_size.to_le_bytes())?;
    writer.write_all(&x_ppm.to_le_bytes())?;
    writer.write_all(&y_ppm.to_le_bytes())?;
    writer.write_all(&colors_used.to_le_bytes())?;
    writer.write_all(&colors_important.to_le_bytes())?;

    for y in 0..height {
        for x in 0..width {
            let digest = hasher(x, y);
            let r = digest[0];
            let g = digest[1];
            let b = digest[2];
            writer.write_all(&[b, g, r])?;
        }
    }

    Ok(())
}
