//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、图像加载与缩放策略、调用隐写核心以及向用户报告结果。

use crate::capacity::{capacity, max_message_len};
use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::LOSSLESS_EXTENSIONS;
use crate::decoder::{Unveiled, decode};
use crate::encoder::encode;
use crate::error::StegoError;
use anyhow::{Context, Result};
use colored::Colorize;
use image::RgbaImage;
use image::imageops::FilterType;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// 加载图像并转换为 RGBA8，必要时按最长边限制等比缩小。
///
/// 隐藏和恢复必须使用相同的 `max_side`，否则像素网格不一致，帧会被破坏。
fn load_carrier(path: &Path, max_side: Option<u32>) -> Result<RgbaImage> {
    let picture = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    let Some(max_side) = max_side else {
        return Ok(picture.to_rgba8());
    };
    anyhow::ensure!(max_side > 0, "--max-side must be greater than zero");

    if picture.width().max(picture.height()) <= max_side {
        return Ok(picture.to_rgba8());
    }

    let resized = picture.resize(max_side, max_side, FilterType::Lanczos3);
    debug!(
        "downscaled {}x{} to {}x{}",
        picture.width(),
        picture.height(),
        resized.width(),
        resized.height()
    );
    Ok(resized.to_rgba8())
}

fn is_lossless(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            LOSSLESS_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// 隐藏结果的默认路径：输入图像旁的 `doctored_<文件名>`。
///
/// 若输入为有损格式，则改用 `.png` 扩展名。
fn default_hidden_path(image: &Path) -> PathBuf {
    let stem = image.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = if is_lossless(image) {
        format!("doctored_{}", image.file_name().unwrap_or_default().to_string_lossy())
    } else {
        format!("doctored_{stem}.png")
    };
    image.with_file_name(file_name)
}

/// 恢复结果的默认路径：输入图像旁的 `recovered_<文件名>.txt`。
fn default_recovered_path(image: &Path) -> PathBuf {
    let stem = image.file_stem().unwrap_or_default().to_string_lossy();
    image.with_file_name(format!("recovered_{stem}.txt"))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 读取图像和文本文件，将文本作为一个帧嵌入图像，并以无损格式写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径及选项的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 目标文件已存在且未指定 `--force`，或目标格式不是无损格式。
/// * 图像没有足够的空间来隐藏文本。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .unwrap_or_else(|| default_hidden_path(&args.image));

    anyhow::ensure!(
        is_lossless(&dest),
        "Output format of {} is not lossless. \nUse one of: {}",
        dest.to_string_lossy().red().bold(),
        LOSSLESS_EXTENSIONS.join(", ").green()
    );
    ensure_writable(&dest, args.force)?;

    let carrier = load_carrier(&args.image, args.max_side)?;

    let text = fs::read(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    let doctored = match encode(&carrier, &text) {
        Ok(doctored) => doctored,
        Err(StegoError::CapacityExceeded { available, needed }) => anyhow::bail!(
            "Not enough space in the image to hide the text. \nRequired: {} bits, Available: {} bits",
            needed.to_string().red().bold(),
            available.to_string().green().bold()
        ),
        Err(e) => {
            return Err(e).context("Failed to hide the text in the image.");
        }
    };

    doctored.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    info!("hid {} bytes in {}", text.len(), dest.display());
    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 读取经过隐写的图像，解码帧载荷并写入目标文本文件。
/// 载荷不是合法 UTF-8 时仍会写出原始字节，并给出警告。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径及选项的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 目标文件已存在且未指定 `--force`。
/// * 图像中没有检测到隐藏的消息。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = args
        .text
        .unwrap_or_else(|| default_recovered_path(&args.image));
    ensure_writable(&dest, args.force)?;

    let picture = load_carrier(&args.image, args.max_side)?;

    let payload = match decode(&picture) {
        Unveiled::Absent => anyhow::bail!(
            "No hidden message found in '{}'. \nThe image may not contain a hidden message, or was resized or saved lossy.",
            args.image.to_string_lossy().red().bold()
        ),
        Unveiled::Corrupt(bytes) => {
            eprintln!(
                "{}",
                "Warning: the recovered data is not valid UTF-8 text, raw bytes are written as-is."
                    .yellow()
                    .bold()
            );
            bytes
        }
        Unveiled::Text(text) => text.into_bytes(),
    };

    fs::write(&dest, &payload).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    info!("recovered {} bytes into {}", payload.len(), dest.display());
    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑。
///
/// 打印图像的可用比特数以及最多能隐藏的消息字节数。
///
/// # Errors
///
/// 无法读取输入的图像文件时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let picture = load_carrier(&args.image, args.max_side)?;
    let (width, height) = picture.dimensions();

    println!(
        "Image {} ({}x{}): {} bits available, up to {} bytes of text.",
        args.image.to_string_lossy().green().bold(),
        width,
        height,
        capacity(width, height).to_string().green().bold(),
        max_message_len(width, height).to_string().green().bold()
    );
    Ok(())
}
