use super::*;

fn cfg(w: u32, h: u32) -> EncoderConfig {
    EncoderConfig {
        width: w,
        height: h,
        fps: Fps::CAPTURE,
        bg_rgba: [255, 255, 255, 255],
    }
}

fn frame(w: u32, h: u32, v: u8) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: vec![v; (w * h * 4) as usize],
    }
}

#[test]
fn in_memory_emits_one_chunk_per_frame() {
    let mut enc = InMemoryEncoder::new(Codec::Vp9);
    enc.begin(cfg(4, 2)).unwrap();
    enc.push_frame(FrameIndex(0), &frame(4, 2, 1)).unwrap();
    enc.push_frame(FrameIndex(1), &frame(4, 2, 2)).unwrap();
    assert_eq!(enc.buffered_frames(), 2);

    let out = enc.finish().unwrap();
    assert_eq!(out.mime, "video/webm");
    assert_eq!(out.chunks.len(), 2);
    assert_eq!(out.len(), 48);

    let (idx, w, h, d0) = parse_in_memory_chunk(&out.chunks[0]).unwrap();
    assert_eq!((idx, w, h), (FrameIndex(0), 4, 2));
    let (_, _, _, d1) = parse_in_memory_chunk(&out.chunks[1]).unwrap();
    assert_ne!(d0, d1);
}

#[test]
fn rejects_out_of_order_frames() {
    let mut enc = InMemoryEncoder::new(Codec::H264);
    enc.begin(cfg(2, 2)).unwrap();
    enc.push_frame(FrameIndex(3), &frame(2, 2, 0)).unwrap();
    let err = enc.push_frame(FrameIndex(3), &frame(2, 2, 0)).unwrap_err();
    assert!(matches!(err, StillmotionError::EncodingRuntime(_)), "{err}");
}

#[test]
fn rejects_wrong_frame_size() {
    let mut enc = InMemoryEncoder::new(Codec::H264);
    enc.begin(cfg(2, 2)).unwrap();
    assert!(enc.push_frame(FrameIndex(0), &frame(4, 2, 0)).is_err());
}

#[test]
fn push_before_begin_fails() {
    let mut enc = InMemoryEncoder::new(Codec::Gif);
    assert!(enc.push_frame(FrameIndex(0), &frame(2, 2, 0)).is_err());
    assert!(enc.finish().is_err());
}

#[test]
fn abort_discards_buffered_output() {
    let mut enc = InMemoryEncoder::new(Codec::Vp8);
    enc.begin(cfg(2, 2)).unwrap();
    enc.push_frame(FrameIndex(0), &frame(2, 2, 0)).unwrap();
    enc.abort();
    assert_eq!(enc.buffered_frames(), 0);
    assert!(enc.config().is_none());
    assert!(enc.finish().is_err());
}

#[test]
fn journal_records_calls() {
    let journal = Arc::new(Mutex::new(EncoderJournal::default()));
    let mut enc = InMemoryEncoder::with_journal(Codec::Vp9, Arc::clone(&journal));
    enc.begin(cfg(2, 2)).unwrap();
    enc.push_frame(FrameIndex(0), &frame(2, 2, 0)).unwrap();
    enc.push_frame(FrameIndex(1), &frame(2, 2, 0)).unwrap();
    enc.finish().unwrap();

    let j = journal.lock().unwrap();
    assert_eq!(j.configs, vec![cfg(2, 2)]);
    assert_eq!(j.frames, vec![FrameIndex(0), FrameIndex(1)]);
    assert_eq!((j.finished, j.aborted), (1, 0));
}

#[test]
fn concat_preserves_chunk_order() {
    let out = EncodedOutput {
        chunks: vec![vec![1, 2], vec![3], vec![4, 5]],
        mime: "video/webm",
    };
    assert!(!out.is_empty());
    assert_eq!(out.concat(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn parse_rejects_short_chunks() {
    assert!(parse_in_memory_chunk(&[0u8; 23]).is_none());
}
