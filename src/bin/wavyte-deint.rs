use std::{
    fs::File,
    io::{BufWriter, Read as _, Write as _},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use wavyte_deinterlace::{
    CpuFeatures, DeinterlaceResult, DeinterlaceStage, FilmModeChange, FrameSink, FrameYuy2,
    MethodRegistry, StageOpts, row_bytes, select_kernels,
};

/// Field buffers the stage keeps for the methods to read.
const FIELDS_AVAILABLE: usize = 4;
/// NTSC frame duration in 90 kHz ticks.
const NTSC_FRAME_DURATION: i64 = 3003;

#[derive(Parser, Debug)]
#[command(name = "wavyte-deint", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the deinterlacing methods this host can run.
    Methods,
    /// Deinterlace a raw packed 4:2:2 (YUY2) file.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input raw YUY2 frames, tightly packed.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame width in pixels.
    #[arg(long)]
    width: usize,

    /// Frame height in scanlines.
    #[arg(long)]
    height: usize,

    /// Output raw YUY2 path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Stage options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the luma plane of every output frame as a PNG into this directory.
    #[arg(long)]
    png_dir: Option<PathBuf>,

    /// Input is bottom field first.
    #[arg(long)]
    bottom_field_first: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Methods => cmd_methods(),
        Command::Run(args) => cmd_run(args),
    }
}

fn host_registry() -> anyhow::Result<MethodRegistry> {
    let mut registry = MethodRegistry::with_builtin_methods();
    registry.filter(CpuFeatures::detect(), FIELDS_AVAILABLE)?;
    Ok(registry)
}

fn cmd_methods() -> anyhow::Result<()> {
    let registry = host_registry()?;
    println!("cpu features: {}", CpuFeatures::detect());
    for m in registry.iter() {
        let mut flags = Vec::new();
        if m.delays_field {
            flags.push("delays-field");
        }
        if m.doscalerbob {
            flags.push("half-height");
        }
        println!(
            "{:<14} fields={} accel={} {}",
            m.short_name,
            m.fields_required,
            m.accel_required,
            flags.join(",")
        );
        println!("    {}: {}", m.name, m.description);
    }
    Ok(())
}

struct FileSink {
    out: Option<BufWriter<File>>,
    png_dir: Option<PathBuf>,
    written: usize,
}

impl FileSink {
    fn write_luma_png(&self, dir: &Path, frame: &FrameYuy2) -> anyhow::Result<()> {
        let luma: Vec<u8> = frame
            .data
            .chunks(frame.stride)
            .flat_map(|row| row[..row_bytes(frame.width)].iter().step_by(2).copied())
            .collect();
        let path = dir.join(format!("frame_{:06}.png", self.written));
        image::save_buffer_with_format(
            &path,
            &luma,
            u32::try_from(frame.width).context("frame width exceeds u32")?,
            u32::try_from(frame.height).context("frame height exceeds u32")?,
            image::ColorType::L8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))
    }
}

impl FrameSink for FileSink {
    fn push_frame(&mut self, frame: FrameYuy2) -> DeinterlaceResult<()> {
        if let Some(out) = self.out.as_mut() {
            out.write_all(&frame.data).context("write output frame")?;
        }
        if let Some(dir) = &self.png_dir {
            self.write_luma_png(dir, &frame)?;
        }
        self.written += 1;
        Ok(())
    }

    fn film_mode_changed(&mut self, change: FilmModeChange) -> DeinterlaceResult<()> {
        let state = if change.film_mode { "on" } else { "off" };
        eprintln!(
            "film mode {state} at output frame {} (phase {})",
            self.written, change.phase
        );
        Ok(())
    }

    fn end(&mut self) -> DeinterlaceResult<()> {
        if let Some(out) = self.out.as_mut() {
            out.flush().context("flush output")?;
        }
        Ok(())
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let opts = match &args.config {
        Some(path) => StageOpts::from_json_path(path)?,
        None => StageOpts::default(),
    };
    let registry = Arc::new(host_registry()?);
    let kernels = select_kernels(CpuFeatures::detect());
    let mut stage = DeinterlaceStage::new(registry, kernels, opts)?;

    let mut input = Vec::new();
    File::open(&args.in_path)
        .with_context(|| format!("open input '{}'", args.in_path.display()))?
        .read_to_end(&mut input)
        .with_context(|| format!("read input '{}'", args.in_path.display()))?;

    let frame_len = row_bytes(args.width) * args.height;
    if frame_len == 0 {
        anyhow::bail!("frame size must be non-zero");
    }
    if input.len() % frame_len != 0 {
        eprintln!(
            "warning: ignoring {} trailing bytes (not a whole frame)",
            input.len() % frame_len
        );
    }

    if let Some(dir) = &args.png_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create png dir '{}'", dir.display()))?;
    }
    let out = match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Some(BufWriter::new(f))
        }
        None => None,
    };
    let mut sink = FileSink {
        out,
        png_dir: args.png_dir.clone(),
        written: 0,
    };

    for (i, chunk) in input.chunks_exact(frame_len).enumerate() {
        let mut frame = FrameYuy2::new(args.width, args.height, chunk.to_vec());
        frame.duration = NTSC_FRAME_DURATION;
        frame.pts = (i as i64 + 1) * NTSC_FRAME_DURATION;
        frame.top_field_first = !args.bottom_field_first;
        stage.push_frame(frame, &mut sink)?;
    }
    let stats = stage.finish(&mut sink)?;

    eprintln!(
        "frames in: {}, frames out: {}, fields dropped: {}, passed through: {}",
        stats.frames_in, stats.frames_out, stats.fields_dropped, stats.passthrough
    );
    if let Some(path) = &args.out {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
