//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 基于长度帧的 LSB (最低有效位) 隐写工具，在无损 RGBA 图像的 R/G/B 通道中隐藏或恢复文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "基于长度帧的 LSB (最低有效位) 隐写工具。\n消息以 32 位长度字段开头，逐位写入每个像素 R、G、B 通道的最低位，Alpha 通道保持不变。\n结果图像必须以无损格式 (PNG, BMP, TIFF, WebP, QOI) 保存。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像中隐藏文本文件内容。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文本。
    Recover(RecoverArgs),

    /// 显示图像可隐藏的最大容量。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: PathBuf,

    /// 结果图像的输出路径，默认为输入图像旁的 `doctored_<文件名>`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 若图像最长边超过该值则先等比缩小。恢复时必须使用相同的值。
    #[arg(long)]
    pub max_side: Option<u32>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复文本的输出路径，默认为输入图像旁的 `recovered_<文件名>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 与隐藏时相同的最长边限制。
    #[arg(long)]
    pub max_side: Option<u32>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 计算容量前应用的最长边限制。
    #[arg(long)]
    pub max_side: Option<u32>,
}
