//! Flow control for outgoing game commands.
//!
//! The game client drops command requests once roughly a hundred are
//! outstanding. [`RequestQueue`] keeps at most `max_in_flight` requests
//! unacknowledged and parks the rest in a FIFO until a `commandResponse`
//! frees a slot.

use std::collections::VecDeque;

use bedrock_proto::Message;
use uuid::Uuid;

/// Default ceiling on unacknowledged command requests.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 100;

/// A command request waiting to be sent or acknowledged.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub id: Uuid,
    pub payload: Message,
}

impl PendingRequest {
    /// Build a `commandRequest` for `command_line` with a fresh id.
    pub fn command(command_line: &str) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            payload: Message::command_request(id, command_line),
        }
    }
}

/// Pending FIFO plus the ordered set of in-flight ids.
#[derive(Debug)]
pub struct RequestQueue {
    max_in_flight: usize,
    pending: VecDeque<PendingRequest>,
    in_flight: Vec<Uuid>,
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IN_FLIGHT)
    }
}

impl RequestQueue {
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            max_in_flight,
            pending: VecDeque::new(),
            in_flight: Vec::new(),
        }
    }

    /// Submit a request.
    ///
    /// Returns the request when it must be sent immediately; otherwise it is
    /// parked until [`acknowledge`](Self::acknowledge) frees a slot.
    pub fn submit(&mut self, request: PendingRequest) -> Option<PendingRequest> {
        if self.in_flight.len() < self.max_in_flight {
            self.in_flight.push(request.id);
            Some(request)
        } else {
            self.pending.push_back(request);
            None
        }
    }

    /// Record a response for `id`.
    ///
    /// Returns the oldest pending request that now has to be sent, if any.
    /// Unknown ids are ignored.
    pub fn acknowledge(&mut self, id: &Uuid) -> Option<PendingRequest> {
        self.release(id)
    }

    /// Give up on an in-flight request that could not be delivered.
    ///
    /// Frees its slot like a response would and returns the parked request
    /// promoted into it, if any.
    pub fn abandon(&mut self, id: &Uuid) -> Option<PendingRequest> {
        self.release(id)
    }

    fn release(&mut self, id: &Uuid) -> Option<PendingRequest> {
        let position = self.in_flight.iter().position(|known| known == id)?;
        self.in_flight.remove(position);

        if self.in_flight.len() >= self.max_in_flight {
            return None;
        }
        let next = self.pending.pop_front()?;
        self.in_flight.push(next.id);
        Some(next)
    }

    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// In-flight ids, oldest first.
    pub fn in_flight_ids(&self) -> &[Uuid] {
        &self.in_flight
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }
}
