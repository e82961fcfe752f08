use std::collections::HashSet;
use std::fmt::Display;

use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;

use crate::{Catalog, Category, Champion, DDragonError, Item, Result, Rune, RuneTree};

pub const MAX_LEGENDARY_ITEMS: usize = 5;
pub const MAX_PRIMARY_MINOR_RUNES: usize = 3;
pub const MAX_SECONDARY_RUNES: usize = 2;

/// 一次随机生成的出装，每次生成整体替换
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Build {
    pub champion: Champion,
    pub legendary_items: Vec<Item>,
    pub boots: Item,
    pub primary_tree: RuneTree,
    pub secondary_tree: RuneTree,
    /// 基石符文固定在第一位，其后依次为主系小符文、副系符文
    pub runes: Vec<Rune>,
    /// 主系符文（含基石）的数量，其余为副系符文
    pub primary_rune_count: usize,
}

impl Build {
    pub fn keystone(&self) -> Option<&Rune> {
        self.primary_runes().first()
    }

    pub fn primary_runes(&self) -> &[Rune] {
        &self.runes[..self.primary_rune_count.min(self.runes.len())]
    }

    pub fn secondary_runes(&self) -> &[Rune] {
        &self.runes[self.primary_rune_count.min(self.runes.len())..]
    }
}

impl Display for Build {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let items = self
            .legendary_items
            .iter()
            .map(|item| format!("{} ({}g)", item.name, item.gold.total))
            .collect::<Vec<_>>()
            .join(", ");
        let runes = self
            .runes
            .iter()
            .map(|rune| rune.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Champion: {}, {} [{}]\n\
            Items: {}\n\
            Boots: {} ({}g)\n\
            Runes ({} / {}): {}",
            self.champion.name,
            self.champion.title,
            self.champion.tags.join(", "),
            items,
            self.boots.name,
            self.boots.gold.total,
            self.primary_tree.name,
            self.secondary_tree.name,
            runes
        )
    }
}

/// 从目录中随机生成一套出装，不修改目录；相同的随机源得到相同的结果
pub fn select_build<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Result<Build> {
    let champion = catalog
        .champions()
        .choose(rng)
        .ok_or(DDragonError::EmptyCatalog(Category::Champions))?;
    let legendary_items = pick_legendary_items(catalog.legendary_items(), rng)?;
    let boots = catalog
        .boots()
        .choose(rng)
        .ok_or(DDragonError::EmptyCatalog(Category::Boots))?;
    let (primary_tree, secondary_tree) = pick_rune_trees(catalog.rune_trees(), rng)?;
    let (runes, primary_rune_count) = pick_runes(primary_tree, secondary_tree, rng)?;

    debug!(
        "生成出装: {} / {}件装备 / {}+{} 共{}个符文",
        champion.name,
        legendary_items.len(),
        primary_tree.name,
        secondary_tree.name,
        runes.len()
    );
    Ok(Build {
        champion: champion.clone(),
        legendary_items,
        boots: boots.clone(),
        primary_tree: primary_tree.clone(),
        secondary_tree: secondary_tree.clone(),
        runes,
        primary_rune_count,
    })
}

impl Catalog {
    pub fn random_build(&self) -> Result<Build> {
        select_build(self, &mut rand::rng())
    }
}

// Fisher-Yates 洗牌后取前5件
fn pick_legendary_items<R: Rng + ?Sized>(items: &[Item], rng: &mut R) -> Result<Vec<Item>> {
    if items.is_empty() {
        return Err(DDragonError::EmptyCatalog(Category::LegendaryItems));
    }
    let mut shuffled = items.iter().collect::<Vec<&Item>>();
    shuffled.shuffle(rng);
    Ok(shuffled
        .into_iter()
        .take(MAX_LEGENDARY_ITEMS)
        .cloned()
        .collect())
}

fn pick_rune_trees<'a, R: Rng + ?Sized>(
    trees: &'a [RuneTree],
    rng: &mut R,
) -> Result<(&'a RuneTree, &'a RuneTree)> {
    let primary = trees
        .choose(rng)
        .ok_or(DDragonError::EmptyCatalog(Category::RuneTrees))?;
    let candidates = trees
        .iter()
        .filter(|tree| tree.id != primary.id)
        .collect::<Vec<&RuneTree>>();
    let secondary = candidates.choose(rng).ok_or_else(|| {
        let distinct = trees.iter().map(|tree| tree.id).collect::<HashSet<_>>();
        DDragonError::InsufficientRuneTrees(distinct.len())
    })?;
    Ok((primary, *secondary))
}

fn pick_rune<'a, R: Rng + ?Sized>(
    tree: &'a RuneTree,
    slot: usize,
    rng: &mut R,
) -> Result<&'a Rune> {
    tree.slots
        .get(slot)
        .and_then(|s| s.runes.choose(rng))
        .ok_or_else(|| DDragonError::EmptyRuneSlot {
            tree: tree.name.clone(),
            slot,
        })
}

// 返回全部符文以及其中主系符文的数量
fn pick_runes<R: Rng + ?Sized>(
    primary: &RuneTree,
    secondary: &RuneTree,
    rng: &mut R,
) -> Result<(Vec<Rune>, usize)> {
    let mut runes = vec![pick_rune(primary, 0, rng)?.clone()];

    // 主系：基石之后最多3个槽位
    let primary_slots = primary
        .slots
        .len()
        .saturating_sub(1)
        .min(MAX_PRIMARY_MINOR_RUNES);
    for slot in 1..=primary_slots {
        runes.push(pick_rune(primary, slot, rng)?.clone());
    }
    let primary_count = runes.len();

    // 副系：跳过基石槽位，最多2个槽位
    let secondary_slots = secondary
        .slots
        .len()
        .saturating_sub(1)
        .min(MAX_SECONDARY_RUNES);
    for slot in 1..=secondary_slots {
        runes.push(pick_rune(secondary, slot, rng)?.clone());
    }
    Ok((runes, primary_count))
}
