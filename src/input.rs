use tracing::debug;

use crate::coords::BoundingBox;
use crate::coords::CoordinateMapper;
use crate::events::InputEvent;
use crate::frame::Clock;
use crate::frame::Scheduler;
use crate::surface::Color;
use crate::surface::Surface;
use crate::universe::Universe;
use crate::visualizer::Visualizer;

/// What the host loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Exit,
}

/// Routes input to the visualizer: clicks on the canvas toggle cells, clicks on the play/pause
/// button toggle the animation.
#[derive(Debug, Clone)]
pub struct InputDispatcher {
    mapper: CoordinateMapper,

    /// Where the canvas is displayed
    canvas: BoundingBox,

    /// Where the play/pause button is displayed
    button: BoundingBox,

    /// Grid color swapped in when grid lines are toggled
    alternate_grid: Color,
}

impl InputDispatcher {
    pub fn new(
        mapper: CoordinateMapper,
        canvas: BoundingBox,
        button: BoundingBox,
        alternate_grid: Color,
    ) -> Self {
        Self {
            mapper,
            canvas,
            button,
            alternate_grid,
        }
    }

    pub fn dispatch<U, S, Q, C>(
        &mut self,
        event: InputEvent,
        vis: &mut Visualizer<U, S, Q, C>,
    ) -> Dispatch
    where
        U: Universe,
        S: Surface,
        Q: Scheduler,
        C: Clock,
    {
        match event {
            InputEvent::Exit => return Dispatch::Exit,
            InputEvent::PlayPause => vis.toggle_animation(),
            InputEvent::Click { x, y } if self.button.contains(x, y) => vis.toggle_animation(),
            InputEvent::Click { x, y } if self.canvas.contains(x, y) => {
                let (row, col) = self.mapper.cell_at(x, y, self.canvas, vis.surface().size());
                vis.toggle_cell(row, col);
            }
            InputEvent::Click { x, y } => debug!(x, y, "click outside of any control"),
            InputEvent::ToggleGridlines => {
                let grid = &mut vis.renderer_mut().palette_mut().grid;
                std::mem::swap(grid, &mut self.alternate_grid);
                vis.redraw();
            }
            InputEvent::Resize => vis.redraw(),
        }

        Dispatch::Continue
    }

    /// Dispatches a batch of events in order, stopping at the first one that asks to exit.
    pub fn dispatch_all<U, S, Q, C>(
        &mut self,
        events: impl IntoIterator<Item = InputEvent>,
        vis: &mut Visualizer<U, S, Q, C>,
    ) -> Dispatch
    where
        U: Universe,
        S: Surface,
        Q: Scheduler,
        C: Clock,
    {
        for event in events {
            if self.dispatch(event, vis) == Dispatch::Exit {
                return Dispatch::Exit;
            }
        }

        Dispatch::Continue
    }
}
