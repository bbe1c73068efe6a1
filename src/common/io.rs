//! Common, IO-related code.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use flate2::{bufread::MultiGzDecoder, write::GzEncoder, Compression};

use super::STDIO_PATH;

/// Transparently open a file with gzip decoder.
///
/// The path `-` selects stdin.
pub fn open_read_maybe_gz<P>(path: P) -> Result<Box<dyn BufRead>, anyhow::Error>
where
    P: AsRef<Path>,
{
    if path.as_ref() == Path::new(STDIO_PATH) {
        tracing::trace!("Reading from stdin");
        Ok(Box::new(BufReader::new(std::io::stdin())))
    } else if path.as_ref().extension().map(|s| s.to_str()) == Some(Some("gz")) {
        tracing::trace!("Opening {:?} as gzip for reading", path.as_ref());
        let file = File::open(path)?;
        let bufreader = BufReader::new(file);
        let decoder = MultiGzDecoder::new(bufreader);
        Ok(Box::new(BufReader::new(decoder)))
    } else {
        tracing::trace!("Opening {:?} as plain text for reading", path.as_ref());
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Output opened by `open_write_maybe_gz()`.
///
/// Call `finish()` when done so that errors on writing the gzip trailer are
/// reported instead of being lost on drop.
pub enum MaybeGzWriter {
    Plain(Box<dyn Write>),
    Gz(GzEncoder<BufWriter<File>>),
}

impl MaybeGzWriter {
    /// Flush all data and, for gzip output, write the trailer.
    pub fn finish(self) -> std::io::Result<()> {
        match self {
            MaybeGzWriter::Plain(mut writer) => writer.flush(),
            MaybeGzWriter::Gz(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for MaybeGzWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            MaybeGzWriter::Plain(writer) => writer.write(buf),
            MaybeGzWriter::Gz(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            MaybeGzWriter::Plain(writer) => writer.flush(),
            MaybeGzWriter::Gz(encoder) => encoder.flush(),
        }
    }
}

/// Transparently open a file with gzip encoder.
///
/// The path `-` selects stdout.
pub fn open_write_maybe_gz<P>(path: P) -> Result<MaybeGzWriter, anyhow::Error>
where
    P: AsRef<Path>,
{
    if path.as_ref() == Path::new(STDIO_PATH) {
        tracing::trace!("Writing to stdout");
        Ok(MaybeGzWriter::Plain(Box::new(BufWriter::new(std::io::stdout()))))
    } else if path.as_ref().extension().map(|s| s.to_str()) == Some(Some("gz")) {
        tracing::trace!("Opening {:?} as gzip for writing", path.as_ref());
        let file = File::create(path)?;
        let bufwriter = BufWriter::new(file);
        let encoder = GzEncoder::new(bufwriter, Compression::default());
        Ok(MaybeGzWriter::Gz(encoder))
    } else {
        tracing::trace!("Opening {:?} as plain text for writing", path.as_ref());
        let file = File::create(path)?;
        Ok(MaybeGzWriter::Plain(Box::new(BufWriter::new(file))))
    }
}

/// Open a tab-separated file with header for reading, transparently
/// decompressing `.gz` files.
pub fn open_tsv_reader(path: &str) -> Result<csv::Reader<Box<dyn BufRead>>, anyhow::Error> {
    let reader = open_read_maybe_gz(path)
        .map_err(|e| anyhow::anyhow!("could not open file {} for reading: {}", path, e))?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b'\t')
        .quoting(false)
        .from_reader(reader))
}

#[cfg(test)]
mod test {
    use std::io::{Read, Write};

    use pretty_assertions::assert_eq;

    #[rstest::rstest]
    #[case("test.txt")]
    #[case("test.txt.gz")]
    fn open_write_then_read_maybe_gz(#[case] filename: &str) -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();

        let mut f = super::open_write_maybe_gz(tmp_dir.join(filename))?;
        f.write_all(b"line one\nline two\n")?;
        f.finish()?;

        let mut buf = String::new();
        super::open_read_maybe_gz(tmp_dir.join(filename))?.read_to_string(&mut buf)?;

        assert_eq!(buf, "line one\nline two\n");

        Ok(())
    }

    #[test]
    fn open_write_gz_is_compressed() -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();

        let mut f = super::open_write_maybe_gz(tmp_dir.join("test.txt.gz"))?;
        f.write_all(b"payload\n")?;
        f.finish()?;

        let mut buf = Vec::new();
        std::fs::File::open(tmp_dir.join("test.txt.gz"))?.read_to_end(&mut buf)?;
        // gzip magic bytes
        assert_eq!(&buf[..2], &[0x1f, 0x8b]);
        // trailer holds the uncompressed size
        assert_eq!(&buf[buf.len() - 4..], &8u32.to_le_bytes());

        Ok(())
    }

    #[test]
    fn open_tsv_reader_missing_file() {
        let err = super::open_tsv_reader("tests/evidence/does-not-exist.tsv")
            .err()
            .expect("file does not exist");

        assert!(err
            .to_string()
            .starts_with("could not open file tests/evidence/does-not-exist.tsv for reading"));
    }
}
