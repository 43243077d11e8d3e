//! 按时间戳升序出队的线程安全优先队列

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use parking_lot::Mutex;

struct Entry<T> {
    at: i64,
    value: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap为大顶堆，反向比较得到小顶堆
        other.at.cmp(&self.at)
    }
}

/// 以毫秒时间戳为序的小顶堆队列
///
/// 时间戳相同的元素出队顺序不作保证。锁内只做堆操作，
/// 不在持锁期间做任何IO。
pub struct TimeOrderedQueue<T> {
    heap: Mutex<BinaryHeap<Entry<T>>>,
}

impl<T> TimeOrderedQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: Mutex::new(BinaryHeap::new()),
        }
    }

    /// 入队，返回入队后的队列长度
    pub fn push(&self, at: i64, value: T) -> usize {
        let mut heap = self.heap.lock();
        heap.push(Entry { at, value });
        heap.len()
    }

    /// 取出时间戳最小的元素
    pub fn pop(&self) -> Option<(i64, T)> {
        self.heap.lock().pop().map(|entry| (entry.at, entry.value))
    }

    pub fn len(&self) -> usize {
        self.heap.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.lock().is_empty()
    }
}

impl<T> Default for TimeOrderedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
