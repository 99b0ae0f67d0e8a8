//! Logging from the render callback.
//!
//! The render callback may not allocate or block, and an installed `log` backend may do both.  Off the render thread,
//! the `rt_*` macros below are plain `log` calls.  On it, the message is formatted into a fixed-size string and pushed
//! onto a preallocated queue, and a forwarding thread hands it to `log` later.
//!
//! A message longer than [MAX_MESSAGE_BYTES] is cut short and marked as such.  A full queue drops the message; the
//! number dropped is reported alongside the next one that gets through.  Forwarding normally happens within
//! microseconds, but a message that waited longer than [LATE_AFTER] says how late it is, since whatever timestamp the
//! backend prints is the forwarding time.
use std::fmt::Arguments;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use arrayvec::ArrayString;
use thingbuf::{recycling::Recycle, ThingBuf};

const MAX_MESSAGE_BYTES: usize = 256;
const QUEUE_CAPACITY: usize = 1024;
const LATE_AFTER: Duration = Duration::from_millis(250);

type MessageBuffer = ArrayString<MAX_MESSAGE_BYTES>;

#[derive(Debug)]
#[allow(clippy::large_enum_variant)]
pub(crate) enum MessageText {
    /// Format strings without arguments need no copy.
    Literal(&'static str),
    Formatted(MessageBuffer),
}

pub(crate) struct PendingMessage {
    level: log::Level,
    target: &'static str,
    text: MessageText,
    cut_short: bool,
    dropped_before: u64,
    queued_at: Instant,
}

/// Builds and resets queue slots in place, so that a slot's string buffer is never copied.
struct PendingMessageRecycler;

impl Recycle<PendingMessage> for PendingMessageRecycler {
    fn new_element(&self) -> PendingMessage {
        PendingMessage {
            level: log::Level::Trace,
            target: module_path!(),
            text: MessageText::Literal(""),
            cut_short: false,
            dropped_before: 0,
            queued_at: Instant::now(),
        }
    }

    fn recycle(&self, element: &mut PendingMessage) {
        element.text = MessageText::Literal("");
        element.cut_short = false;
        element.dropped_before = 0;
    }
}

/// Fills a [MessageBuffer] and silently discards whatever doesn't fit, remembering that it did so.
struct BoundedWriter<'a> {
    buffer: &'a mut MessageBuffer,
    overflowed: bool,
}

impl std::fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        if self.overflowed {
            return Ok(());
        }

        if self.buffer.try_push_str(s).is_ok() {
            return Ok(());
        }

        // Keep as many whole characters as still fit.
        self.overflowed = true;
        for c in s.chars() {
            if self.buffer.try_push(c).is_err() {
                break;
            }
        }

        Ok(())
    }
}

fn capture(level: log::Level, args: Arguments<'_>, target: &'static str) -> PendingMessage {
    let mut cut_short = false;

    let text = if let Some(literal) = args.as_str() {
        MessageText::Literal(literal)
    } else {
        use std::fmt::Write;

        let mut buffer = MessageBuffer::new();
        let mut writer = BoundedWriter {
            buffer: &mut buffer,
            overflowed: false,
        };
        // BoundedWriter never reports an error.
        let _ = writer.write_fmt(args);
        cut_short = writer.overflowed;
        MessageText::Formatted(buffer)
    };

    PendingMessage {
        level,
        target,
        text,
        cut_short,
        dropped_before: 0,
        queued_at: Instant::now(),
    }
}

struct Forwarder {
    queue: ThingBuf<PendingMessage, PendingMessageRecycler>,
    thread: JoinHandle<()>,
}

lazy_static::lazy_static! {
    static ref FORWARDER: Forwarder = Forwarder {
        queue: ThingBuf::with_recycle(QUEUE_CAPACITY, PendingMessageRecycler),
        // The thread's first access to FORWARDER waits for this initializer to finish.
        thread: std::thread::spawn(forwarding_loop),
    };
}

/// Called by [rt_log] on the render thread.
pub(crate) fn enqueue(level: log::Level, args: Arguments<'_>, target: &'static str) {
    use std::cell::Cell;

    thread_local! {
        static DROPPED: Cell<u64> = const { Cell::new(0) };
    }

    let mut message = capture(level, args, target);
    message.dropped_before = DROPPED.get();

    if FORWARDER.queue.push(message).is_ok() {
        DROPPED.set(0);
        FORWARDER.thread.thread().unpark();
    } else {
        DROPPED.set(DROPPED.get() + 1);
    }
}

fn emit(message: PendingMessage) {
    if message.dropped_before > 0 {
        log::warn!(
            "The render thread's log queue overflowed; {} messages were lost",
            message.dropped_before
        );
    }

    let text = match &message.text {
        MessageText::Literal(s) => *s,
        MessageText::Formatted(buffer) => buffer.as_str(),
    };

    // Small enough to stay on the stack in the common case.
    let mut notes: smallvec::SmallVec<[u8; 64]> = smallvec::SmallVec::new();
    {
        use std::io::Write;

        let waited = message.queued_at.elapsed();
        if waited > LATE_AFTER {
            let _ = write!(notes, "; logged {:.3}s late", waited.as_secs_f64());
        }
        if message.cut_short {
            let _ = write!(notes, "; cut short");
        }
    }
    let notes = std::str::from_utf8(&notes).unwrap_or_default();

    log::log!(target: message.target, message.level, "{text} [render thread{notes}]");
}

fn forwarding_loop() {
    loop {
        while let Some(message) = FORWARDER.queue.pop() {
            emit(message);
        }
        // An unpark between the last pop and here makes this return at once.
        std::thread::park();
    }
}

/// Start the forwarding thread now, from a thread that is allowed to spawn one.
pub(crate) fn ensure_log_ctx() {
    lazy_static::initialize(&FORWARDER);
}

/// `log::log!` for code that may run on the render thread.
macro_rules! rt_log {
    ($level: expr, $fmt: expr $(, $args: expr)* $(,)?) => {
        let level = $level;
        if level <= log::max_level() {
            if $crate::is_audio_thread::is_audio_thread() {
                $crate::logging::enqueue(level, format_args!($fmt, $($args),*), module_path!());
            } else {
                log::log!(level, $fmt, $($args),*);
            }
        }
    }
}

macro_rules! rt_error {
    ($($args: tt)+) => {
        rt_log!(log::Level::Error, $($args)*);
    }
}

macro_rules! rt_warn {
    ($($args: tt)+) => {
        rt_log!(log::Level::Warn, $($args)*);
    }
}
