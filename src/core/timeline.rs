use super::state::{ProcessId, Ticks};

/// A contiguous span during which one process holds the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub pid: ProcessId,
    pub start: Ticks,
    pub end: Ticks,
}

impl Segment {
    pub fn new(pid: ProcessId, start: Ticks, end: Ticks) -> Self {
        debug_assert!(end > start, "Segment for {pid} must be non-empty");
        Self { pid, start, end }
    }

    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Gantt chart of a run. Idle time is the gap between segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `[start, end)` for `pid`. With `coalesce`, a span that
    /// directly continues the previous segment of the same process
    /// extends it instead.
    pub fn record(&mut self, pid: ProcessId, start: Ticks, end: Ticks, coalesce: bool) {
        debug_assert!(
            self.segments.last().is_none_or(|last| last.end <= start),
            "Segment {pid} [{start}, {end}) overlaps the timeline"
        );

        if coalesce {
            if let Some(last) = self.segments.last_mut() {
                if last.pid == pid && last.end == start {
                    last.end = end;
                    return;
                }
            }
        }
        self.segments.push(Segment::new(pid, start, end));
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments_of(&self, pid: ProcessId) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |seg| seg.pid == pid)
    }

    pub fn service_of(&self, pid: ProcessId) -> Ticks {
        self.segments_of(pid).map(Segment::duration).sum()
    }

    pub fn completion_of(&self, pid: ProcessId) -> Option<Ticks> {
        self.segments_of(pid).last().map(|seg| seg.end)
    }

    pub fn makespan(&self) -> Ticks {
        self.segments.last().map_or(0, |seg| seg.end)
    }

    pub fn busy_time(&self) -> Ticks {
        self.segments.iter().map(Segment::duration).sum()
    }

    /// Idle spans as `(start, end)`, including any gap before the first segment.
    pub fn idle_spans(&self) -> Vec<(Ticks, Ticks)> {
        let mut spans = Vec::new();
        let mut cursor = 0;
        for seg in &self.segments {
            if seg.start > cursor {
                spans.push((cursor, seg.start));
            }
            cursor = seg.end;
        }
        spans
    }

    // Switches between different processes; idle gaps do not count
    pub fn context_switches(&self) -> usize {
        self.segments
            .windows(2)
            .filter(|pair| pair[0].pid != pair[1].pid)
            .count()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
