//! 把 tracing 输出转发到浏览器控制台

use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

/// 缓冲一条日志，释放时整条写入控制台
pub struct ConsoleWriter {
    buf: Vec<u8>,
    level: Level,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        let value = JsValue::from_str(line);
        if self.level == Level::ERROR {
            web_sys::console::error_1(&value);
        } else if self.level == Level::WARN {
            web_sys::console::warn_1(&value);
        } else if self.level == Level::INFO {
            web_sys::console::log_1(&value);
        } else {
            web_sys::console::debug_1(&value);
        }
    }
}

/// 按日志级别选择控制台方法
#[derive(Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            buf: Vec::new(),
            level: Level::INFO,
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            buf: Vec::new(),
            level: *meta.level(),
        }
    }
}

/// 初始化日志，浏览器中没有可用的系统时钟，不输出时间
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_max_level(Level::INFO)
        .try_init();
}
