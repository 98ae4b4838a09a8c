//! 테스트 지원: 고정 Focus Provider, 로그 수집기.
//!
//! 다른 크레이트의 테스트에서는 `test-support` 기능으로 사용한다.

use crate::error::CoreError;
use crate::models::element::{CellIndex, ElementId, ElementSnapshot};
use crate::ports::focus::FocusProvider;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

/// 벡터 순서가 곧 포커스 체인인 고정 트리
pub struct FakeTree {
    elements: Mutex<Vec<ElementSnapshot>>,
    focused: Mutex<Option<ElementId>>,
}

impl FakeTree {
    pub fn new(elements: Vec<ElementSnapshot>) -> Self {
        Self {
            elements: Mutex::new(elements),
            focused: Mutex::new(None),
        }
    }

    pub fn focused_id(&self) -> Option<ElementId> {
        *self.focused.lock()
    }

    fn position(&self, id: ElementId) -> Option<usize> {
        self.elements.lock().iter().position(|e| e.id == id)
    }
}

impl FocusProvider for FakeTree {
    fn snapshot(&self, id: ElementId) -> Option<ElementSnapshot> {
        self.elements.lock().iter().find(|e| e.id == id).cloned()
    }

    fn focused(&self) -> Option<ElementId> {
        self.focused_id()
    }

    fn next_in_focus_chain(&self, id: ElementId) -> Option<ElementId> {
        let pos = self.position(id)?;
        let elements = self.elements.lock();
        Some(elements[(pos + 1) % elements.len()].id)
    }

    fn previous_in_focus_chain(&self, id: ElementId) -> Option<ElementId> {
        let pos = self.position(id)?;
        let elements = self.elements.lock();
        Some(elements[(pos + elements.len() - 1) % elements.len()].id)
    }

    fn focus_chain_len(&self) -> usize {
        self.elements.lock().len()
    }

    fn set_focus(&self, id: ElementId) -> Result<(), CoreError> {
        self.position(id)
            .ok_or_else(|| CoreError::InvalidFocusTarget(id.to_string()))?;
        *self.focused.lock() = Some(id);
        Ok(())
    }

    fn set_current_index(&self, id: ElementId, index: CellIndex) -> Result<(), CoreError> {
        let mut elements = self.elements.lock();
        let container = elements
            .iter_mut()
            .find(|e| e.id == id)
            .and_then(|e| e.container.as_mut())
            .ok_or_else(|| CoreError::InvalidFocusTarget(id.to_string()))?;
        container.current = Some(index);
        Ok(())
    }

    fn cell_text(&self, _id: ElementId, index: CellIndex) -> Option<String> {
        Some(format!("r{}c{}", index.row, index.column))
    }
}

/// 로그 수집기. fmt 출력 그대로 모으므로 이벤트를 감싼 span 이름도 남는다
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이 수집기를 기본 subscriber 로 두고 `f` 실행
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(self.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter(self.buffer.clone())
    }
}

pub struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
