//! # Event 模块
//!
//! tween 生命周期事件与观察者。
//!
//! 事件在触发它的 `start`/`update` 调用中同步分发，不排队、不异步。

use std::fmt;

/// 生命周期事件
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenEvent {
    /// 开始播放
    Started,
    /// 进度更新（0.0 - 1.0，未应用缓动）
    Updated(f32),
    /// 完成一轮循环（参数为刚结束的循环序号，从 0 开始）
    LoopCompleted(i32),
    /// 播放完成
    Completed,
}

/// 订阅 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&TweenEvent)>;

/// 观察者列表
#[derive(Default)]
pub struct Observers {
    callbacks: Vec<(SubscriptionId, Callback)>,
    next_id: u64,
}

impl Observers {
    /// 创建空的观察者列表
    pub fn new() -> Self {
        Self::default()
    }

    /// 订阅事件
    pub fn subscribe(&mut self, callback: impl FnMut(&TweenEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// 取消订阅
    ///
    /// # 返回
    /// 订阅存在并被移除时返回 `true`
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        self.callbacks.len() != before
    }

    /// 按订阅顺序分发事件
    pub fn emit(&mut self, event: TweenEvent) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(&event);
        }
    }

    /// 观察者数量
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// 是否没有观察者
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();

        let first = log.clone();
        observers.subscribe(move |e| first.borrow_mut().push((1, *e)));
        let second = log.clone();
        observers.subscribe(move |e| second.borrow_mut().push((2, *e)));

        observers.emit(TweenEvent::Started);
        assert_eq!(
            *log.borrow(),
            vec![(1, TweenEvent::Started), (2, TweenEvent::Started)]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut observers = Observers::new();

        let counter = count.clone();
        let id = observers.subscribe(move |_| *counter.borrow_mut() += 1);
        observers.emit(TweenEvent::Completed);

        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.emit(TweenEvent::Completed);

        assert_eq!(*count.borrow(), 1);
        assert!(observers.is_empty());
    }
}
