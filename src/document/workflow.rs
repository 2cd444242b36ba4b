//! Typed, borrowed views over a workflow document tree.

use super::node::Node;

/// Root of a workflow document.
#[derive(Debug, Clone, Copy)]
pub struct Workflow<'a> {
    root: &'a Node,
}

impl<'a> Workflow<'a> {
    pub fn new(root: &'a Node) -> Self {
        Self { root }
    }

    /// The trigger section, looked up under the literal `on` key.
    ///
    /// serde_yaml follows the YAML 1.2 core schema, so an unquoted `on` key
    /// stays a string and no boolean-key fallback is needed.
    pub fn on(&self) -> Option<&'a Node> {
        self.root.get("on")
    }

    pub fn jobs_node(&self) -> Option<&'a Node> {
        self.root.get("jobs")
    }

    /// Jobs in document order. Entries whose value is not a mapping are skipped.
    pub fn jobs(&self) -> Vec<Job<'a>> {
        let Some(entries) = self.jobs_node().and_then(Node::as_mapping) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter(|(_, node)| node.is_mapping())
            .map(|(id, node)| Job { id, node })
            .collect()
    }

    pub fn job(&self, id: &str) -> Option<Job<'a>> {
        self.jobs().into_iter().find(|job| job.id == id)
    }

    /// Workflow-level `defaults.run.shell`.
    pub fn default_shell(&self) -> Option<&'a str> {
        default_run_shell(self.root)
    }
}

/// One entry under `jobs`.
#[derive(Debug, Clone, Copy)]
pub struct Job<'a> {
    pub id: &'a str,
    node: &'a Node,
}

impl<'a> Job<'a> {
    /// Document path of this job, e.g. `jobs.build`.
    pub fn path(&self) -> String {
        format!("jobs.{}", self.id)
    }

    /// `needs`, normalized from absent / string / list form.
    pub fn needs(&self) -> Vec<&'a str> {
        self.node.get("needs").map(Node::strings).unwrap_or_default()
    }

    pub fn runs_on(&self) -> Option<&'a Node> {
        self.node.get("runs-on")
    }

    pub fn matrix(&self) -> Option<Matrix<'a>> {
        self.node
            .lookup(&["strategy", "matrix"])
            .filter(|node| node.is_mapping())
            .map(|node| Matrix { node })
    }

    /// Job-level `defaults.run.shell`.
    pub fn default_shell(&self) -> Option<&'a str> {
        default_run_shell(self.node)
    }

    /// Steps in order. Non-mapping items keep their index but are skipped.
    pub fn steps(&self) -> Vec<Step<'a>> {
        let Some(items) = self.node.get("steps").and_then(Node::as_sequence) else {
            return Vec::new();
        };
        items
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_mapping())
            .map(|(index, node)| Step {
                job_id: self.id,
                index,
                node,
            })
            .collect()
    }
}

/// One item of a job's `steps` list.
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    job_id: &'a str,
    pub index: usize,
    node: &'a Node,
}

impl<'a> Step<'a> {
    /// Document path of this step, e.g. `jobs.build.steps[3]`.
    pub fn path(&self) -> String {
        format!("jobs.{}.steps[{}]", self.job_id, self.index)
    }

    pub fn id(&self) -> Option<&'a str> {
        self.field("id")
    }

    pub fn name(&self) -> Option<&'a str> {
        self.field("name")
    }

    pub fn uses(&self) -> Option<&'a str> {
        self.field("uses")
    }

    pub fn run(&self) -> Option<&'a str> {
        self.field("run")
    }

    pub fn shell(&self) -> Option<&'a str> {
        self.field("shell")
    }

    /// The step's `if` expression, when it is a string.
    pub fn condition(&self) -> Option<&'a str> {
        self.field("if")
    }

    fn field(&self, key: &str) -> Option<&'a str> {
        self.node.get(key).and_then(Node::as_str)
    }
}

/// A job's `strategy.matrix` mapping.
#[derive(Debug, Clone, Copy)]
pub struct Matrix<'a> {
    node: &'a Node,
}

impl<'a> Matrix<'a> {
    /// `include` entries that are mappings.
    pub fn include(&self) -> Vec<&'a Node> {
        self.node
            .get("include")
            .and_then(Node::as_sequence)
            .map(|items| items.iter().filter(|n| n.is_mapping()).collect())
            .unwrap_or_default()
    }

    /// Every string value `key` can take: the direct list or scalar, then each
    /// `include` override, uniqued in first-seen order.
    pub fn values(&self, key: &str) -> Vec<&'a str> {
        let mut values: Vec<&'a str> = Vec::new();
        let direct = self.node.get(key).map(Node::strings).unwrap_or_default();
        let included = self
            .include()
            .into_iter()
            .filter_map(|entry| entry.get(key).and_then(Node::as_str));

        for value in direct.into_iter().chain(included) {
            if !values.contains(&value) {
                values.push(value);
            }
        }
        values
    }
}

fn default_run_shell(node: &Node) -> Option<&str> {
    node.lookup(&["defaults", "run", "shell"])
        .and_then(Node::as_str)
}
