// Push socket transport (web_sys::WebSocket, JSON text frames)
use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use super::wire::{self, ClientMsg, ServerMsg};
use super::{SyncChannel, SyncError, SyncEvent, SyncSink};
use crate::model::Cell;
use crate::util::{clog, cwarn};

pub const REFRESH_PERIOD_MS: u32 = 1000;

#[allow(dead_code)]
struct WsHandlers {
    onopen: Closure<dyn FnMut(Event)>,
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    onerror: Closure<dyn FnMut(ErrorEvent)>,
    onclose: Closure<dyn FnMut(Event)>,
}

#[derive(Clone)]
pub struct PushChannel {
    url: String,
    sink: SyncSink,
    ws: Rc<RefCell<Option<WebSocket>>>,
    handlers: Rc<RefCell<Option<WsHandlers>>>,
    ticker: Rc<RefCell<Option<Interval>>>,
}

/// Turns an inbound text frame into a store update.
pub fn handle_frame(frame: &str) -> Result<SyncEvent, SyncError> {
    match wire::decode(frame)? {
        ServerMsg::Cells(payload) => Ok(SyncEvent::Cells(payload.into_cells())),
    }
}

/// Frames emitted for a cell creation, in send order.
pub fn create_frames(cell: Cell) -> [ClientMsg; 2] {
    [ClientMsg::AddCell(cell), ClientMsg::GetCells]
}

impl PushChannel {
    pub fn new(url: &str, sink: SyncSink) -> Self {
        Self {
            url: url.trim().to_string(),
            sink,
            ws: Rc::new(RefCell::new(None)),
            handlers: Rc::new(RefCell::new(None)),
            ticker: Rc::new(RefCell::new(None)),
        }
    }

    fn emit(&self, msg: &ClientMsg) {
        let ws = {
            let guard = self.ws.borrow();
            let Some(ws) = guard.as_ref() else {
                return;
            };
            ws.clone()
        };
        if ws.ready_state() != WebSocket::OPEN {
            clog(&format!("socket not open, dropping {:?}", msg));
            return;
        }
        match wire::encode(msg) {
            Ok(frame) => {
                if ws.send_with_str(&frame).is_err() {
                    cwarn("socket send failed");
                }
            }
            Err(err) => cwarn(&format!("could not encode frame: {}", err)),
        }
    }

    fn open(&self) -> Result<(), SyncError> {
        if self.url.is_empty() {
            return Err(SyncError::Socket("empty socket url".into()));
        }
        let ws = WebSocket::new(&self.url)
            .map_err(|e| SyncError::Socket(format!("failed to open {}: {:?}", self.url, e)))?;
        *self.ws.borrow_mut() = Some(ws.clone());

        let onopen = {
            let this = self.clone();
            Closure::wrap(Box::new(move |_e: Event| {
                clog(&format!("socket connected {}", this.url));
                this.emit(&ClientMsg::GetCells);
            }) as Box<dyn FnMut(Event)>)
        };
        let onmessage = {
            let sink = self.sink.clone();
            Closure::wrap(Box::new(move |e: MessageEvent| {
                let Some(frame) = e.data().as_string() else {
                    return;
                };
                match handle_frame(&frame) {
                    Ok(event) => sink(event),
                    Err(err) => cwarn(&format!("ignoring socket frame: {}", err)),
                }
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        let onerror = {
            let url = self.url.clone();
            Closure::wrap(Box::new(move |_e: ErrorEvent| {
                cwarn(&format!("socket error {}", url));
            }) as Box<dyn FnMut(ErrorEvent)>)
        };
        let onclose = {
            let ws_ref = self.ws.clone();
            let url = self.url.clone();
            Closure::wrap(Box::new(move |e: Event| {
                ws_ref.borrow_mut().take();
                match e.dyn_ref::<CloseEvent>() {
                    Some(close) => cwarn(&format!("socket closed {} ({})", url, close.code())),
                    None => cwarn(&format!("socket closed {}", url)),
                }
            }) as Box<dyn FnMut(Event)>)
        };

        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        *self.handlers.borrow_mut() = Some(WsHandlers {
            onopen,
            onmessage,
            onerror,
            onclose,
        });
        Ok(())
    }
}

impl SyncChannel for PushChannel {
    fn start(&self) {
        if let Err(err) = self.open() {
            cwarn(&err.to_string());
            return;
        }
        let this = self.clone();
        *self.ticker.borrow_mut() = Some(Interval::new(REFRESH_PERIOD_MS, move || this.refresh()));
    }

    fn refresh(&self) {
        self.emit(&ClientMsg::GetCells);
    }

    fn create(&self, cell: Cell) {
        for msg in create_frames(cell) {
            self.emit(&msg);
        }
    }

    fn stop(&self) {
        self.ticker.borrow_mut().take();
        if let Some(ws) = self.ws.borrow_mut().take() {
            ws.set_onopen(None);
            ws.set_onmessage(None);
            ws.set_onerror(None);
            ws.set_onclose(None);
            let _ = ws.close();
        }
        self.handlers.borrow_mut().take();
    }
}
