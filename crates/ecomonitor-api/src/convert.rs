// SPDX-License-Identifier: Apache-2.0

use ecomonitor_model::{NewsItem, Region, RegionActivity};
use ecomonitor_query::{LikeToggle, NewsHit, NewsPage, RegionDigest};

use crate::dto::{
    AuthorDto, CompanyDto, FormattedNewsDto, LikeToggleDto, NewsPageDto, RegionActivityDto,
    RegionDigestDto, RegionDto, DTO_TIMESTAMP_FORMAT,
};

fn region_dto(region: &Region) -> RegionDto {
    RegionDto {
        id: region.id.get(),
        name: region.name.clone(),
    }
}

#[must_use]
pub fn format_news(item: &NewsItem, liked_by_user: Option<bool>) -> FormattedNewsDto {
    FormattedNewsDto {
        id: item.id.get(),
        title: item.title.clone(),
        body: item.body.clone(),
        post_date: item.post_date.format(DTO_TIMESTAMP_FORMAT).to_string(),
        update_date: item
            .update_date
            .map(|at| at.format(DTO_TIMESTAMP_FORMAT).to_string()),
        source_url: item.source_url.clone(),
        authors: item
            .authors
            .iter()
            .map(|a| AuthorDto {
                id: a.id.as_str().to_string(),
                name: a.name.clone(),
            })
            .collect(),
        companies: item
            .companies
            .iter()
            .map(|c| CompanyDto {
                id: c.id.get(),
                name: c.name.clone(),
                region_id: c.region_id.get(),
            })
            .collect(),
        regions: item.regions.iter().map(region_dto).collect(),
        like_count: item.like_count,
        is_liked_by_user: liked_by_user,
    }
}

#[must_use]
pub fn format_hit(hit: &NewsHit) -> FormattedNewsDto {
    format_news(&hit.item, hit.liked_by_user)
}

#[must_use]
pub fn news_page_dto(page: &NewsPage) -> NewsPageDto {
    NewsPageDto {
        items: page.items.iter().map(format_hit).collect(),
        remaining_count: page.remaining_count,
        is_it_end: page.is_it_end,
    }
}

#[must_use]
pub fn like_toggle_dto(toggle: &LikeToggle) -> LikeToggleDto {
    LikeToggleDto {
        news_id: toggle.news_id.get(),
        liked: toggle.liked,
        like_count: toggle.like_count,
    }
}

#[must_use]
pub fn region_activity_dto(activity: &RegionActivity) -> RegionActivityDto {
    RegionActivityDto {
        region: region_dto(&activity.region),
        count: activity.count,
        rank: activity.rank,
    }
}

#[must_use]
pub fn region_digest_dto(digest: &RegionDigest) -> RegionDigestDto {
    RegionDigestDto {
        region: region_dto(&digest.region),
        activity_count: digest.activity_count,
        items: digest
            .items
            .iter()
            .map(|item| format_news(item, None))
            .collect(),
    }
}
