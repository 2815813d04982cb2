// Example: a task list rendered through the recycling engine into a terminal "container".
use std::collections::BTreeMap;
use std::convert::Infallible;

use vlist_recycler::{
    Align, Container, ItemRenderer, ListEngine, ListItem, ListenerId, SlotId, ViewportState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Task {
    id: u64,
    title: String,
    priority: Priority,
    due_in_days: i64,
    is_completed: bool,
}

impl Task {
    fn is_overdue(&self) -> bool {
        !self.is_completed && self.due_in_days < 0
    }

    fn is_expiring_soon(&self) -> bool {
        !self.is_completed && (0..=1).contains(&self.due_in_days)
    }
}

impl ListItem for Task {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }
}

struct RowRenderer;

impl RowRenderer {
    fn row(task: &Task) -> String {
        let check = if task.is_completed { "x" } else { " " };
        let flag = if task.is_overdue() {
            " OVERDUE"
        } else if task.is_expiring_soon() {
            " due soon"
        } else {
            ""
        };
        format!(
            "[{check}] data-task-id={} {:<28} {:?}{flag}",
            task.id, task.title, task.priority
        )
    }
}

impl ItemRenderer<Task> for RowRenderer {
    type Node = String;
    type Error = Infallible;

    fn render(&mut self, item: &Task) -> Result<String, Infallible> {
        Ok(Self::row(item))
    }

    fn rebind(&mut self, node: &mut String, item: &Task) -> Result<(), Infallible> {
        *node = Self::row(item);
        Ok(())
    }
}

/// Prints every mutation and keeps the placed rows so the screen can be drawn.
#[derive(Default)]
struct Terminal {
    viewport: ViewportState,
    rows: BTreeMap<SlotId, (Option<u64>, String)>,
}

impl Terminal {
    fn draw(&self) {
        let mut shown: Vec<_> = self
            .rows
            .values()
            .filter_map(|(offset, text)| offset.map(|o| (o, text)))
            .collect();
        shown.sort();
        println!("--- offset {} ---", self.viewport.scroll_offset);
        for (offset, text) in shown {
            println!("{offset:>6}px  {text}");
        }
    }
}

impl Container<String> for Terminal {
    fn viewport(&self) -> ViewportState {
        self.viewport
    }

    fn scroll_to(&mut self, offset: u64) {
        println!("scroll_to {offset}");
        self.viewport.scroll_offset = offset;
    }

    fn set_content_extent(&mut self, extent: u64) {
        println!("content extent {extent}px");
    }

    fn mount(&mut self, slot: SlotId, node: &String) {
        self.rows.insert(slot, (None, node.clone()));
    }

    fn place(&mut self, slot: SlotId, node: &String, offset: u64) {
        self.rows.insert(slot, (Some(offset), node.clone()));
    }

    fn park(&mut self, slot: SlotId, _node: &String) {
        if let Some(row) = self.rows.get_mut(&slot) {
            row.0 = None;
        }
    }

    fn unmount(&mut self, slot: SlotId, _node: String) {
        self.rows.remove(&slot);
    }

    fn listen(&mut self) -> ListenerId {
        println!("listening for scroll/resize");
        ListenerId(1)
    }

    fn unlisten(&mut self, listener: ListenerId) {
        println!("listener {} removed", listener.0);
    }
}

fn tasks(count: u64) -> Vec<Task> {
    const PRIORITIES: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];
    (0..count)
        .map(|id| Task {
            id,
            title: format!("Task number {id}"),
            priority: PRIORITIES[(id % 3) as usize],
            due_in_days: (id % 7) as i64 - 2,
            is_completed: id % 5 == 0,
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let terminal = Terminal {
        viewport: ViewportState::new(0, 400),
        ..Default::default()
    };
    let mut list: ListEngine<Task, Terminal, RowRenderer> = ListEngine::builder()
        .container(terminal)
        .renderer(RowRenderer)
        .item_extent(60)
        .overscan(2)
        .build()?;

    let mut all = tasks(10_000);
    list.set_data(all.clone())?;
    list.container().draw();

    // Completing a task keeps its id; only that row is rebound.
    all[2].is_completed = true;
    list.set_data(all)?;
    list.container().draw();

    list.container_mut().viewport.scroll_offset = 6_030;
    list.request_sync();
    list.flush()?;
    list.container().draw();

    list.scroll_to_index(9_999, Align::End)?;
    list.container().draw();

    // A filter leaves only a handful of tasks: the offset is pulled back.
    list.set_data(tasks(5))?;
    list.container().draw();
    println!("pool: {:?}", list.pool_stats());

    list.destroy();
    Ok(())
}
