use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rtp::media::h264::nal;
use rtp::{Codec, Packetizer, PacketizerConfig, RtpPacket};

#[derive(Clone, Copy, ValueEnum)]
enum CodecArg {
    H264,
    Opus,
    Generic,
}

impl From<CodecArg> for Codec {
    fn from(arg: CodecArg) -> Self {
        match arg {
            CodecArg::H264 => Codec::H264,
            CodecArg::Opus => Codec::Opus,
            CodecArg::Generic => Codec::Generic,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "rtp-packetize",
    about = "Packetize one H.264 access unit or raw frame into RTP packets"
)]
struct Args {
    /// Input file (Annex B access unit for H.264, raw frame otherwise)
    input: PathBuf,

    /// Codec of the input
    #[arg(long, value_enum, default_value = "h264")]
    codec: CodecArg,

    /// Maximum RTP payload size in bytes
    #[arg(long, default_value_t = 1200)]
    mtu: u16,

    /// RTP payload type
    #[arg(long, short = 't', default_value_t = 96)]
    payload_type: u8,

    /// SSRC (random when omitted)
    #[arg(long)]
    ssrc: Option<u32>,

    /// Timestamp advance after the frame, in clock ticks
    #[arg(long, default_value_t = 3000)]
    samples: u32,

    /// Write packets here, each prefixed with a 2-byte length (RFC 4571)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn describe(codec: Codec, packet: &RtpPacket) -> String {
    let kind = match codec {
        Codec::H264 => nal::nal_unit_type(packet.payload())
            .map(|(kind, raw)| format!(" {:?}({})", kind, raw))
            .unwrap_or_default(),
        _ => String::new(),
    };
    format!(
        "seq={:<5} ts={:<10} marker={} len={}{}",
        packet.sequence_number(),
        packet.timestamp(),
        packet.marker() as u8,
        packet.payload().len(),
        kind
    )
}

fn write_framed(path: &Path, packets: &[RtpPacket]) -> io::Result<()> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    for packet in packets {
        let bytes = packet.to_bytes();
        let len = u16::try_from(bytes.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "packet exceeds 65535 bytes"))?;
        out.write_all(&len.to_be_bytes())?;
        out.write_all(&bytes)?;
    }
    out.flush()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let codec = Codec::from(args.codec);

    let data = match fs::read(&args.input) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Failed to read {}: {}", args.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut packetizer = Packetizer::new(
        codec,
        PacketizerConfig {
            payload_type: args.payload_type,
            mtu: args.mtu,
            ssrc: args.ssrc,
            ..PacketizerConfig::default()
        },
    );

    let packets = match packetizer.packetize(&data, args.samples) {
        Ok(packets) => packets,
        Err(e) => {
            eprintln!("Failed to packetize: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{} bytes -> {} packets (ssrc={:#010X}, pt={})",
        data.len(),
        packets.len(),
        packetizer.ssrc(),
        packetizer.payload_type()
    );
    for packet in &packets {
        println!("{}", describe(codec, packet));
    }

    if let Some(path) = &args.output {
        if let Err(e) = write_framed(path, &packets) {
            eprintln!("Failed to write {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
