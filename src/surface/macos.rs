#![allow(unused_unsafe)]

use std::cell::RefCell;
use std::sync::Once;
use std::time::Duration;

use objc2::rc::Retained;
use objc2::runtime::{AnyClass, AnyObject, ClassBuilder, Sel};
use objc2::{msg_send, sel, MainThreadMarker};
use objc2_app_kit::{
    NSApplication, NSApplicationActivationPolicy, NSEventMask, NSImage, NSMenu, NSMenuItem,
    NSStatusBar, NSStatusItem, NSVariableStatusItemLength,
};
use objc2_foundation::{NSDate, NSDefaultRunLoopMode, NSString};
use tracing::warn;

use super::MenuSurface;
use crate::error::{LilError, Result};
use crate::menu::{MenuAction, MenuNode};

const STATUS_TITLE: &str = "Lil";
const STATUS_SYMBOL: &str = "checklist";

thread_local! {
    static PENDING_TAGS: RefCell<Vec<isize>> = const { RefCell::new(Vec::new()) };
}

static REGISTER_HANDLER: Once = Once::new();
static mut HANDLER_INSTANCE: *const AnyObject = std::ptr::null();

/// Target of every actionable item. Records the item's tag for the UI loop.
unsafe extern "C" fn menu_item_activated(
    _this: *const AnyObject,
    _sel: Sel,
    sender: *const AnyObject,
) {
    if sender.is_null() {
        return;
    }
    let tag: isize = msg_send![sender, tag];
    PENDING_TAGS.with(|tags| tags.borrow_mut().push(tag));
}

fn menu_handler() -> *const AnyObject {
    REGISTER_HANDLER.call_once(|| unsafe {
        let Some(superclass) = AnyClass::get(c"NSObject") else {
            return;
        };
        let Some(mut builder) = ClassBuilder::new(c"LilMenuHandler", superclass) else {
            return;
        };
        builder.add_method(
            sel!(menuItemActivated:),
            menu_item_activated as unsafe extern "C" fn(*const AnyObject, Sel, *const AnyObject),
        );
        let cls = builder.register();
        let instance: *const AnyObject = msg_send![cls, new];
        HANDLER_INSTANCE = instance;
    });
    unsafe { HANDLER_INSTANCE }
}

fn take_pending_tag() -> Option<isize> {
    PENDING_TAGS.with(|tags| {
        let mut tags = tags.borrow_mut();
        (!tags.is_empty()).then(|| tags.remove(0))
    })
}

/// A status bar item whose menu is rebuilt from scratch on every `show`.
pub struct StatusBarSurface {
    mtm: MainThreadMarker,
    app: Retained<NSApplication>,
    status_item: Retained<NSStatusItem>,
    handler: *const AnyObject,
    actions: Vec<MenuAction>,
}

impl StatusBarSurface {
    pub fn new() -> Result<Self> {
        let mtm = MainThreadMarker::new().ok_or_else(|| {
            LilError::SurfaceUnavailable("the status bar must be created on the main thread".into())
        })?;

        let handler = menu_handler();
        if handler.is_null() {
            return Err(LilError::SurfaceUnavailable(
                "could not register the menu action handler".into(),
            ));
        }

        let app = NSApplication::sharedApplication(mtm);
        let status_item = unsafe {
            // Menu-bar only: no Dock icon, no app menu.
            app.setActivationPolicy(NSApplicationActivationPolicy::Accessory);
            app.finishLaunching();
            NSStatusBar::systemStatusBar().statusItemWithLength(NSVariableStatusItemLength)
        };
        if let Some(button) = unsafe { status_item.button(mtm) } {
            let symbol = unsafe {
                NSImage::imageWithSystemSymbolName_accessibilityDescription(
                    &NSString::from_str(STATUS_SYMBOL),
                    Some(&NSString::from_str(STATUS_TITLE)),
                )
            };
            match symbol {
                Some(image) => unsafe {
                    // Template images follow the menu bar's light/dark appearance.
                    image.setTemplate(true);
                    button.setImage(Some(&image));
                },
                None => {
                    warn!(symbol = STATUS_SYMBOL, "status icon unavailable, using title");
                    unsafe { button.setTitle(&NSString::from_str(STATUS_TITLE)) };
                }
            }
        }

        Ok(Self {
            mtm,
            app,
            status_item,
            handler,
            actions: Vec::new(),
        })
    }

    fn make_item(&self, title: &str) -> Retained<NSMenuItem> {
        let item = NSMenuItem::new(self.mtm);
        unsafe { item.setTitle(&NSString::from_str(title)) };
        item
    }
}

impl MenuSurface for StatusBarSurface {
    fn show(&mut self, nodes: &[MenuNode]) {
        let mtm = self.mtm;
        let menu = NSMenu::new(mtm);
        self.actions.clear();

        unsafe {
            menu.setAutoenablesItems(false);

            for node in nodes {
                match node {
                    MenuNode::Header(text) => {
                        let item = self.make_item(text);
                        item.setEnabled(false);
                        menu.addItem(&item);
                    }
                    MenuNode::Separator => menu.addItem(&NSMenuItem::separatorItem(mtm)),
                    MenuNode::Leaf(leaf) => {
                        let item = self.make_item(&leaf.title);
                        if !leaf.tooltip.is_empty() {
                            item.setToolTip(Some(&NSString::from_str(&leaf.tooltip)));
                        }
                        match &leaf.action {
                            Some(action) => {
                                item.setTag(self.actions.len() as isize);
                                item.setAction(Some(sel!(menuItemActivated:)));
                                let _: () = msg_send![&item, setTarget: self.handler];
                                item.setEnabled(true);
                                self.actions.push(action.clone());
                            }
                            None => item.setEnabled(false),
                        }
                        menu.addItem(&item);
                    }
                }
            }

            self.status_item.setMenu(Some(&menu));
        }
    }

    fn next_action(&mut self, timeout: Duration) -> Option<MenuAction> {
        let deadline = unsafe { NSDate::dateWithTimeIntervalSinceNow(timeout.as_secs_f64()) };

        loop {
            let event = unsafe {
                self.app.nextEventMatchingMask_untilDate_inMode_dequeue(
                    NSEventMask::Any,
                    Some(&deadline),
                    NSDefaultRunLoopMode,
                    true,
                )
            };
            let Some(event) = event else { break };
            unsafe { self.app.sendEvent(&event) };

            if let Some(tag) = take_pending_tag() {
                return self.action_for(tag);
            }
        }

        take_pending_tag().and_then(|tag| self.action_for(tag))
    }
}

impl StatusBarSurface {
    fn action_for(&self, tag: isize) -> Option<MenuAction> {
        let action = usize::try_from(tag)
            .ok()
            .and_then(|index| self.actions.get(index))
            .cloned();
        if action.is_none() {
            warn!(tag, "activated menu item has no action");
        }
        action
    }
}

impl Drop for StatusBarSurface {
    fn drop(&mut self) {
        unsafe { NSStatusBar::systemStatusBar().removeStatusItem(&self.status_item) };
    }
}
