//! Frame source for boards without a camera module.
//!
//! Every capture fails, so plant checks degrade to "Cam fail" on the
//! display while ranging, fire suppression and following keep working.

use log::debug;

use crate::app::ports::FramePort;
use crate::vision::Frame;

#[derive(Debug, Default, Clone, Copy)]
pub struct NoCamera;

impl FramePort for NoCamera {
    fn capture(&mut self) -> Option<Frame> {
        debug!("no camera fitted");
        None
    }
}
