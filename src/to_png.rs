//! Host-side previews of panel frames and animations as PNG and APNG files.
#![cfg(feature = "host")]

use std::error::Error;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder};

use crate::animation::{Animation, PlaybackMode};
use crate::led_panel::{Frame, PANEL_HEIGHT, PANEL_WIDTH, RGB8};

/// Color of the board behind the LEDs.
const BACKGROUND: RGB8 = RGB8::new(16, 16, 16);

/// Render one frame into a PNG whose longer side is at most `max_dimension` pixels.
///
/// Each LED is drawn as a disc centered in its cell.
///
/// # Errors
///
/// Returns any file or encoder error.
pub fn write_frame_png(
    frame: &Frame,
    output_path: impl AsRef<Path>,
    max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    let output_path = output_path.as_ref();
    let cell_size = cell_size_for(max_dimension);
    let (width, height, pixels) = render(frame, cell_size);

    let mut encoder = Encoder::new(create_writer(output_path)?, width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    println!("wrote PNG to {}", output_path.display());
    Ok(())
}

/// Render an animation into a looping APNG, one image per flush, each shown
/// for as long as the panel would show it.
///
/// In [`PlaybackMode::ClearBetween`] the dark blink between frames is a
/// one-millisecond black image, so it stays visible as a flicker.
///
/// # Errors
///
/// Returns any file or encoder error.
pub fn write_animation_apng(
    animation: &Animation,
    output_path: impl AsRef<Path>,
    max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    assert!(!animation.steps.is_empty(), "animation must have frames");
    let output_path = output_path.as_ref();
    let cell_size = cell_size_for(max_dimension);

    let mut images: Vec<(Frame, u16)> = Vec::with_capacity(animation.flush_count());
    for (frame_index, (frame, hold)) in animation.steps.iter().enumerate() {
        if frame_index > 0 && animation.mode == PlaybackMode::ClearBetween {
            images.push((Frame::new(), 1));
        }
        let hold_ms = u16::try_from(hold.as_millis()).unwrap_or(u16::MAX).max(1);
        images.push((*frame, hold_ms));
    }

    let frame_count = u32::try_from(images.len())?;
    let (width, height, _) = render(&Frame::new(), cell_size);
    let mut encoder = Encoder::new(create_writer(output_path)?, width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_animated(frame_count, 0)?;
    let mut writer = encoder.write_header()?;
    for (frame, hold_ms) in &images {
        let (_, _, pixels) = render(frame, cell_size);
        writer.set_frame_delay(*hold_ms, 1000)?;
        writer.write_image_data(&pixels)?;
    }
    writer.finish()?;
    println!(
        "wrote APNG of {} ({} images) to {}",
        animation.name,
        images.len(),
        output_path.display()
    );
    Ok(())
}

fn create_writer(output_path: &Path) -> Result<BufWriter<File>, Box<dyn Error>> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(BufWriter::new(File::create(output_path)?))
}

fn cell_size_for(max_dimension: u32) -> u32 {
    let cells = PANEL_WIDTH.max(PANEL_HEIGHT) as u32;
    assert!(max_dimension >= cells, "max_dimension must fit one pixel per LED");
    max_dimension / cells
}

/// Rasterize `frame` as RGB8 bytes, returning `(width, height, bytes)`.
fn render(frame: &Frame, cell_size: u32) -> (u32, u32, Vec<u8>) {
    let width = PANEL_WIDTH as u32 * cell_size;
    let height = PANEL_HEIGHT as u32 * cell_size;
    let mut bytes = Vec::with_capacity((width * height * 3) as usize);

    // Disc radius, squared, in doubled coordinates so the center can sit between pixels.
    let radius = i64::from(cell_size) * 4 / 5;
    let radius_sq = radius * radius;
    for y in 0..height {
        for x in 0..width {
            let row = (y / cell_size) as usize;
            let column = (x / cell_size) as usize;
            let delta_x = i64::from(x % cell_size) * 2 + 1 - i64::from(cell_size);
            let delta_y = i64::from(y % cell_size) * 2 + 1 - i64::from(cell_size);
            let color = if delta_x * delta_x + delta_y * delta_y <= radius_sq {
                frame[(row, column)]
            } else {
                BACKGROUND
            };
            bytes.extend_from_slice(&[color.r, color.g, color.b]);
        }
    }
    (width, height, bytes)
}
