// HTTP polling transport (gloo-net)
use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::{Request, Response};
use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;

use super::{SyncChannel, SyncError, SyncEvent, SyncSink};
use crate::model::{Cell, CellsPayload, ServerInfo};
use crate::util::{clog, cwarn};

pub const INFO_PATH: &str = "/info";
pub const CELLS_PATH: &str = "/api/getcells";
pub const ADD_CELL_PATH: &str = "/api/addcell";
const FALLBACK_POLL_MS: u32 = 1000;

/// Poll period for a server stepping every `update_secs`: half the step.
pub fn poll_period_ms(update_secs: f64) -> u32 {
    if !update_secs.is_finite() || update_secs <= 0.0 {
        return FALLBACK_POLL_MS;
    }
    ((update_secs / 2.0) * 1000.0).round().clamp(1.0, i32::MAX as f64) as u32
}

/// A create is followed by a refresh once the POST got any response, even
/// a refusal. Transport failures skip it.
pub fn refresh_after_post(res: &Result<(), SyncError>) -> bool {
    matches!(res, Ok(()) | Err(SyncError::Status(_)))
}

pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

struct Inner {
    base: String,
    sink: SyncSink,
    poll: RefCell<Option<Interval>>,
    stopped: std::cell::Cell<bool>,
}

#[derive(Clone)]
pub struct PollingChannel {
    inner: Rc<Inner>,
}

fn ensure_ok(resp: &Response) -> Result<(), SyncError> {
    if resp.ok() {
        Ok(())
    } else {
        Err(SyncError::Status(resp.status()))
    }
}

async fn fetch_cells(base: &str) -> Result<Vec<Cell>, SyncError> {
    let resp = Request::get(&endpoint(base, CELLS_PATH)).send().await?;
    ensure_ok(&resp)?;
    let payload: CellsPayload = resp.json().await?;
    Ok(payload.into_cells())
}

async fn fetch_info(base: &str) -> Result<ServerInfo, SyncError> {
    let resp = Request::get(&endpoint(base, INFO_PATH)).send().await?;
    ensure_ok(&resp)?;
    Ok(resp.json::<ServerInfo>().await?)
}

async fn post_cell(base: &str, cell: &Cell) -> Result<(), SyncError> {
    let resp = Request::post(&endpoint(base, ADD_CELL_PATH))
        .json(cell)?
        .send()
        .await?;
    ensure_ok(&resp)
}

impl PollingChannel {
    pub fn new(base: &str, sink: SyncSink) -> Self {
        Self {
            inner: Rc::new(Inner {
                base: base.to_string(),
                sink,
                poll: RefCell::new(None),
                stopped: std::cell::Cell::new(false),
            }),
        }
    }

    fn install_poll(&self, period_ms: u32) {
        let this = self.clone();
        let interval = Interval::new(period_ms, move || this.refresh());
        *self.inner.poll.borrow_mut() = Some(interval);
        clog(&format!("polling {} every {}ms", CELLS_PATH, period_ms));
    }
}

impl SyncChannel for PollingChannel {
    fn start(&self) {
        self.inner.stopped.set(false);
        self.refresh();
        let this = self.clone();
        spawn_local(async move {
            let period = match fetch_info(&this.inner.base).await {
                Ok(info) => {
                    if this.inner.stopped.get() {
                        return;
                    }
                    (this.inner.sink)(SyncEvent::Info(info));
                    poll_period_ms(info.update)
                }
                Err(err) => {
                    cwarn(&format!("{} failed: {}", INFO_PATH, err));
                    FALLBACK_POLL_MS
                }
            };
            if this.inner.stopped.get() {
                return;
            }
            this.install_poll(period);
        });
    }

    fn refresh(&self) {
        let inner = self.inner.clone();
        spawn_local(async move {
            match fetch_cells(&inner.base).await {
                Ok(cells) => {
                    if !inner.stopped.get() {
                        (inner.sink)(SyncEvent::Cells(cells));
                    }
                }
                Err(err) => cwarn(&format!("{} failed: {}", CELLS_PATH, err)),
            }
        });
    }

    fn create(&self, cell: Cell) {
        let this = self.clone();
        spawn_local(async move {
            clog(&format!("adding cell at x: {} y: {}", cell.x, cell.y));
            let res = post_cell(&this.inner.base, &cell).await;
            if let Err(err) = &res {
                cwarn(&format!("{} failed: {}", ADD_CELL_PATH, err));
            }
            if refresh_after_post(&res) {
                this.refresh();
            }
        });
    }

    fn stop(&self) {
        self.inner.stopped.set(true);
        self.inner.poll.borrow_mut().take();
    }
}
