// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide daemon state (spec §3.2): a single owned struct passed by
//! reference to handlers. No global singletons.

use std::path::PathBuf;
use std::time::Instant;

use rdc_adapters::ReplayAdapter;
use rdc_core::{ActionTree, CaptureInfo, Eid};

use crate::replay_head::ReplayHead;
use crate::shader_cache::ShaderCache;
use crate::vfs::VfsTree;

/// Everything the dispatch loop and handlers need, owned by the daemon's
/// main loop and passed around by `&mut` reference — never behind a lock,
/// since exactly one request is in flight at a time (spec §5).
pub struct DaemonState {
    pub capture_path: PathBuf,
    pub capture_info: Option<CaptureInfo>,
    pub token: String,
    pub adapter: Option<Box<dyn ReplayAdapter>>,
    pub root_actions: ActionTree,
    pub replay_head: ReplayHead,
    pub temp_dir: Option<PathBuf>,
    pub vfs_tree: VfsTree,
    pub shader_cache: ShaderCache,
    pub last_activity: Instant,
    pub session_name: String,
}

impl DaemonState {
    /// Construct diagnostic state with no replay loaded: only `no_replay`
    /// handlers (`ping`, `status`, `shutdown`) are usable.
    pub fn no_replay(token: String, session_name: String) -> Self {
        Self {
            capture_path: PathBuf::new(),
            capture_info: None,
            token,
            adapter: None,
            root_actions: ActionTree {
                roots: Vec::new(),
                max_eid: 0,
            },
            replay_head: ReplayHead::new(0),
            temp_dir: None,
            vfs_tree: VfsTree::empty(),
            shader_cache: ShaderCache::default(),
            last_activity: Instant::now(),
            session_name,
        }
    }

    /// Construct state for an opened capture: loads the action tree from
    /// the adapter, builds the static VFS skeleton, and allocates the
    /// session temp directory.
    pub fn opened(
        capture_path: PathBuf,
        capture_info: CaptureInfo,
        token: String,
        session_name: String,
        mut adapter: Box<dyn ReplayAdapter>,
        temp_dir: PathBuf,
    ) -> Self {
        let root_actions = adapter.root_actions();
        let max_eid = root_actions.max_eid;
        let passes = crate::passes::detect_passes(&root_actions);
        let resources = adapter.resources();
        let vfs_tree = VfsTree::build_static(&root_actions, &passes, &resources);
        Self {
            capture_path,
            capture_info: Some(capture_info),
            token,
            adapter: Some(adapter),
            root_actions,
            replay_head: ReplayHead::new(max_eid),
            temp_dir: Some(temp_dir),
            vfs_tree,
            shader_cache: ShaderCache::default(),
            last_activity: Instant::now(),
            session_name,
        }
    }

    pub fn max_eid(&self) -> Eid {
        self.replay_head.max_eid
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn adapter_mut(&mut self) -> Option<&mut (dyn ReplayAdapter + 'static)> {
        self.adapter.as_deref_mut()
    }

    pub fn adapter(&self) -> Option<&(dyn ReplayAdapter + 'static)> {
        self.adapter.as_deref()
    }
}
